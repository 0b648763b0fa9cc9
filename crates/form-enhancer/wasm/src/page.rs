// File: src/page.rs
// Purpose: Document access and the page-wide singletons

use form_enhancer_core::feedback::{Parent, STYLE_BLOCK, TOAST_CONTAINER};
use form_enhancer_core::{ensure_singleton, HostError, PageHost, SingletonSpec};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

/// Best-effort text for a thrown JS value
pub fn js_error(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}

pub fn host_error(err: HostError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// [`PageHost`] over a live document
pub struct DocumentHost<'a>(pub &'a Document);

impl PageHost for DocumentHost<'_> {
    type Node = Element;

    fn find_by_id(&self, id: &str) -> Option<Element> {
        self.0.get_element_by_id(id)
    }

    fn create(&self, spec: &SingletonSpec) -> Result<Element, HostError> {
        let create_err = |e: JsValue| HostError::Create {
            tag: spec.tag,
            reason: js_error(&e),
        };

        let element = self.0.create_element(spec.tag).map_err(create_err)?;
        element.set_id(spec.id);
        if let Some(class) = spec.class {
            element.set_class_name(class);
        }
        if let Some(text) = spec.text {
            element.set_text_content(Some(text));
        }
        if spec.parent == Parent::Body {
            element.set_attribute("aria-live", "polite").map_err(create_err)?;
        }

        let parent: Element = match spec.parent {
            Parent::Head => self
                .0
                .head()
                .map(Element::from)
                .ok_or(HostError::MissingParent("head"))?,
            Parent::Body => self
                .0
                .body()
                .map(Element::from)
                .ok_or(HostError::MissingParent("body"))?,
        };
        parent.append_child(&element).map_err(create_err)?;
        Ok(element)
    }
}

/// The injected `<style>` block, inserted on first call
pub fn ensure_styles(document: &Document) -> Result<Element, HostError> {
    ensure_singleton(&DocumentHost(document), &STYLE_BLOCK)
}

/// The shared toast overlay, created on first call
pub fn toast_container(document: &Document) -> Result<Element, HostError> {
    ensure_singleton(&DocumentHost(document), &TOAST_CONTAINER)
}
