// File: src/dom.rs
// Purpose: `FormView` over a live `<form>` element

use std::rc::Rc;

use form_enhancer_core::feedback::{classes, ControlSnapshot};
use form_enhancer_core::{
    EnhancerConfig, Field, FieldId, FieldKind, FormModel, FormView, LoadingLabel, Toast,
    ValidationError,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::page::{js_error, window};
use crate::toast;

const FIELD_SELECTOR: &str = "input, select, textarea";

/// Input types that are controls rather than data
const SKIPPED_TYPES: &[&str] = &["submit", "button", "reset", "image"];

pub struct DomFormView {
    form: HtmlFormElement,
    submit: Option<HtmlElement>,
    config: Rc<EnhancerConfig>,
    label: LoadingLabel,
}

impl DomFormView {
    /// `submit` may be `None`; loading then only marks the form itself
    pub fn new(form: HtmlFormElement, submit: Option<HtmlElement>, config: Rc<EnhancerConfig>) -> Self {
        Self {
            form,
            submit,
            config,
            label: LoadingLabel::new(),
        }
    }

    pub fn form(&self) -> &HtmlFormElement {
        &self.form
    }

    /// Field elements in document order; indexes match [`FieldId`]
    pub fn field_elements(&self) -> Vec<Element> {
        let Ok(nodes) = self.form.query_selector_all(FIELD_SELECTOR) else {
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .filter(|el| {
                let kind = el.get_attribute("type").unwrap_or_default().to_ascii_lowercase();
                !(el.tag_name().eq_ignore_ascii_case("input") && SKIPPED_TYPES.contains(&kind.as_str()))
            })
            .collect()
    }

    /// The field an event target belongs to, if any
    pub fn field_id(&self, target: &Element) -> Option<FieldId> {
        self.field_elements()
            .iter()
            .position(|el| el == target)
            .map(FieldId)
    }

    fn read_field(&self, element: &Element) -> Field {
        let name = element.get_attribute("name").unwrap_or_default();
        let type_attr = if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.type_()
        } else {
            element.tag_name().to_ascii_lowercase()
        };

        let mut field = Field::new(name, FieldKind::parse(&type_attr));
        field.required = element.has_attribute("required");
        field.confirm = element.has_attribute("data-confirm");
        field.min_length = element
            .get_attribute("data-min-length")
            .and_then(|v| v.trim().parse().ok());
        if let Some(list) = element.get_attribute("data-allowed-extensions") {
            field = field.allow_extensions(list.split(','));
        }
        field.value = read_value(element, &field.kind);
        field
    }

    fn annotate(&self, element: &Element, error: Option<&ValidationError>) {
        let existing = element
            .next_element_sibling()
            .filter(|sibling| sibling.class_list().contains(classes::FEEDBACK));

        let result = match error {
            Some(error) => show_error(element, existing, error),
            None => {
                let _ = element.class_list().remove_1(classes::INVALID);
                let _ = element.remove_attribute("aria-invalid");
                if let Some(feedback) = existing {
                    feedback.remove();
                }
                Ok(())
            }
        };

        if let Err(e) = result {
            tracing::warn!("failed to annotate field: {}", js_error(&e));
        }
    }

    fn toggle_loading(&self, loading: bool) -> Result<(), JsValue> {
        let form_classes = self.form.class_list();
        if loading {
            form_classes.add_1(classes::LOADING)?;
        } else {
            form_classes.remove_1(classes::LOADING)?;
        }

        let Some(control) = &self.submit else {
            return self.toggle_form_spinner(loading);
        };

        let original = self.label.capture(|| ControlSnapshot {
            label: control.inner_html(),
            disabled: control.has_attribute("disabled"),
        });

        if loading {
            control.set_attribute("disabled", "")?;
            control.set_attribute("aria-busy", "true")?;
            control.class_list().add_1(classes::LOADING)?;
            control.set_text_content(Some(&self.config.loading_text));
            control.append_child(&*spinner()?)?;
        } else {
            control.set_inner_html(&original.label);
            if !original.disabled {
                control.remove_attribute("disabled")?;
            }
            control.remove_attribute("aria-busy")?;
            control.class_list().remove_1(classes::LOADING)?;
        }
        Ok(())
    }

    fn toggle_form_spinner(&self, loading: bool) -> Result<(), JsValue> {
        if loading {
            self.form.append_child(&*spinner()?)?;
        } else if let Some(existing) = self.form.query_selector(&format!(".{}", classes::SPINNER))? {
            existing.remove();
        }
        Ok(())
    }
}

impl FormView for DomFormView {
    fn snapshot(&self) -> FormModel {
        let mut model = FormModel::new();
        model.action = self.form.get_attribute("action");
        model.method = self.form.get_attribute("method");
        model.reset_on_success = self.form.has_attribute("data-reset-on-success");
        model.fields = self
            .field_elements()
            .iter()
            .map(|el| self.read_field(el))
            .collect();
        model
    }

    fn render_validity(&self, form: &FormModel) {
        for (element, field) in self.field_elements().iter().zip(&form.fields) {
            self.annotate(element, field.error.as_ref());
        }
    }

    fn render_field(&self, id: FieldId, field: &Field) {
        if let Some(element) = self.field_elements().get(id.0) {
            self.annotate(element, field.error.as_ref());
        }
    }

    fn set_loading(&self, loading: bool) {
        if let Err(e) = self.toggle_loading(loading) {
            tracing::warn!(loading, "failed to toggle loading state: {}", js_error(&e));
        }
    }

    fn notify(&self, toast: Toast) {
        if let Err(e) = toast::show(toast) {
            tracing::warn!("failed to show toast: {}", js_error(&e));
        }
    }

    fn navigate(&self, url: &str) {
        let result = window().and_then(|w| w.location().assign(url));
        if let Err(e) = result {
            tracing::warn!(url, "navigation failed: {}", js_error(&e));
        }
    }

    fn reset_fields(&self) {
        for element in self.field_elements() {
            clear_value(&element);
            self.annotate(&element, None);
        }
    }

    fn page_url(&self) -> String {
        window()
            .and_then(|w| w.location().href())
            .unwrap_or_default()
    }
}

fn read_value(element: &Element, kind: &FieldKind) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        if *kind == FieldKind::File {
            return input
                .files()
                .map(|files| {
                    (0..files.length())
                        .filter_map(|i| files.get(i))
                        .map(|file| file.name())
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .unwrap_or_default();
        }
        return input.value();
    }
    if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        return select.value();
    }
    if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
        return textarea.value();
    }
    String::new()
}

/// Empty a field. `form.reset()` would restore `value=` defaults instead.
fn clear_value(element: &Element) {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        match input.type_().to_ascii_lowercase().as_str() {
            "hidden" => {}
            "checkbox" | "radio" => input.set_checked(false),
            _ => input.set_value(""),
        }
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.set_selected_index(-1);
    } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
        textarea.set_value("");
    }
}

/// Mark a field invalid, reusing its message element if it has one
fn show_error(element: &Element, existing: Option<Element>, error: &ValidationError) -> Result<(), JsValue> {
    element.class_list().add_1(classes::INVALID)?;
    element.set_attribute("aria-invalid", "true")?;

    let feedback = match existing {
        Some(feedback) => feedback,
        None => {
            let document = element
                .owner_document()
                .ok_or_else(|| JsValue::from_str("field is not in a document"))?;
            let feedback = document.create_element("div")?;
            feedback.set_class_name(classes::FEEDBACK);
            element.after_with_node_1(&feedback)?;
            feedback
        }
    };
    feedback.set_text_content(Some(&error.to_string()));
    Ok(())
}

fn spinner() -> Result<Element, JsValue> {
    let document = crate::page::document()?;
    let spinner = document.create_element("span")?;
    spinner.set_class_name(classes::SPINNER);
    spinner.set_attribute("aria-hidden", "true")?;
    Ok(spinner)
}
