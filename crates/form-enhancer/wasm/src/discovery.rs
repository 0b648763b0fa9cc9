// File: src/discovery.rs
// Purpose: Find managed forms and wire their listeners

use std::rc::Rc;

use form_enhancer_core::feedback::classes;
use form_enhancer_core::{EnhancerConfig, FormController};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlElement, HtmlFormElement};

use crate::dom::DomFormView;
use crate::fetch::FetchTransport;

/// Enhance every form matching the configured selector.
///
/// Forms already carrying `data-enhanced` are skipped, so calling this again
/// never attaches a second set of listeners. Returns how many forms were
/// newly enhanced.
pub fn enhance_all(document: &Document, config: Rc<EnhancerConfig>) -> Result<u32, JsValue> {
    let forms = document.query_selector_all(&config.form_selector)?;
    let mut enhanced = 0;

    for i in 0..forms.length() {
        let Some(node) = forms.item(i) else {
            continue;
        };
        let form = match node.dyn_into::<HtmlFormElement>() {
            Ok(form) => form,
            Err(_) => {
                tracing::warn!(selector = %config.form_selector, "selector matched a non-form element");
                continue;
            }
        };
        if form.has_attribute(classes::ENHANCED_ATTR) {
            continue;
        }

        enhance(form, Rc::clone(&config))?;
        enhanced += 1;
    }

    tracing::info!(enhanced, "forms enhanced");
    Ok(enhanced)
}

fn enhance(form: HtmlFormElement, config: Rc<EnhancerConfig>) -> Result<(), JsValue> {
    form.set_attribute(classes::ENHANCED_ATTR, "")?;

    let submit = form
        .query_selector(&config.submit_selector)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    if submit.is_none() {
        tracing::warn!(
            selector = %config.submit_selector,
            "form has no submit control; loading will only mark the form"
        );
    }

    let controller = Rc::new(FormController::new(config.as_ref().clone()));
    let view = Rc::new(DomFormView::new(form.clone(), submit, config));
    let transport = Rc::new(FetchTransport::new(form.clone()));

    {
        let (controller, view) = (Rc::clone(&controller), Rc::clone(&view));
        let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let controller = Rc::clone(&controller);
            let view = Rc::clone(&view);
            let transport = Rc::clone(&transport);
            spawn_local(async move {
                let result = controller.submit(transport.as_ref(), view.as_ref()).await;
                tracing::debug!(?result, "submit handled");
            });
        });
        form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
        on_submit.forget();
    }

    // blur does not bubble; focusout does
    {
        let (controller, view) = (Rc::clone(&controller), Rc::clone(&view));
        let on_blur = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(id) = event_target(&event).and_then(|el| view.field_id(&el)) {
                controller.blur(view.as_ref(), id);
            }
        });
        form.add_event_listener_with_callback("focusout", on_blur.as_ref().unchecked_ref())?;
        on_blur.forget();
    }

    {
        let on_input = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(id) = event_target(&event).and_then(|el| view.field_id(&el)) {
                controller.input(view.as_ref(), id);
            }
        });
        form.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
        on_input.forget();
    }

    Ok(())
}

fn event_target(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}
