// File: src/toast.rs
// Purpose: Rendering toasts into the shared container

use std::cell::RefCell;
use std::time::Duration;

use form_enhancer_core::feedback::classes;
use form_enhancer_core::{Toast, ToastId, ToastStack};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::page::{document, host_error, toast_container};

/// Length of the `fe-toast-out` animation in the stylesheet
const EXIT_ANIMATION_MS: u32 = 300;

thread_local! {
    static TOASTS: RefCell<ToastStack> = RefCell::new(ToastStack::new());
}

fn now() -> Duration {
    Duration::from_millis(js_sys::Date::now() as u64)
}

/// Show a toast, scheduling its removal if it is timed
pub fn show(toast: Toast) -> Result<ToastId, JsValue> {
    let document = document()?;
    let container = toast_container(&document).map_err(host_error)?;

    let id = TOASTS.with(|stack| stack.borrow_mut().push(toast.clone(), now()));
    let panel = render(&document, id, &toast)?;
    container.append_child(&panel)?;

    if let Some(lifetime) = toast.lifetime.duration() {
        Timeout::new(timeout_ms(lifetime), move || expire(id)).forget();
    }
    Ok(id)
}

/// `setTimeout` takes an i32; anything larger fires immediately
fn timeout_ms(lifetime: Duration) -> u32 {
    let max = i32::MAX as u32;
    u32::try_from(lifetime.as_millis()).map_or(max, |ms| ms.min(max))
}

/// Close a toast. Does nothing if it is already gone.
pub fn dismiss(id: ToastId) {
    let removed = TOASTS.with(|stack| stack.borrow_mut().dismiss(id));
    if removed {
        leave(id);
    }
}

/// Number of toasts not yet dismissed
pub fn live_count() -> usize {
    TOASTS.with(|stack| stack.borrow().len())
}

fn expire(id: ToastId) {
    let expired = TOASTS.with(|stack| {
        let mut stack = stack.borrow_mut();
        let mut expired = stack.expire(now());
        if stack.dismiss(id) {
            expired.push(id);
        }
        expired
    });

    for id in expired {
        leave(id);
    }
}

/// Play the exit animation, then detach
fn leave(id: ToastId) {
    let Some(panel) = find_panel(id) else {
        return;
    };
    let _ = panel.class_list().add_1(classes::TOAST_LEAVING);
    Timeout::new(EXIT_ANIMATION_MS, move || detach(&panel)).forget();
}

fn detach(panel: &Element) {
    if panel.parent_node().is_some() {
        panel.remove();
    }
}

fn find_panel(id: ToastId) -> Option<Element> {
    let selector = format!("[{}=\"{}\"]", classes::TOAST_ID_ATTR, id);
    document().ok()?.query_selector(&selector).ok().flatten()
}

fn render(document: &Document, id: ToastId, toast: &Toast) -> Result<Element, JsValue> {
    let panel = document.create_element("div")?;
    panel.set_class_name(&format!("{} {}", classes::TOAST, toast.severity.css_class()));
    panel.set_attribute("role", "alert")?;
    panel.set_attribute(classes::TOAST_ID_ATTR, &id.to_string())?;

    let title = document.create_element("div")?;
    title.set_class_name(classes::TOAST_TITLE);
    title.set_text_content(Some(&toast.title));

    let message = document.create_element("div")?;
    message.set_class_name(classes::TOAST_MESSAGE);
    message.set_text_content(Some(&toast.message));

    let close = document.create_element("button")?;
    close.set_class_name(classes::TOAST_CLOSE);
    close.set_attribute("type", "button")?;
    close.set_attribute("aria-label", "Close")?;
    close.set_text_content(Some("\u{00d7}"));

    let on_close = Closure::<dyn FnMut()>::new(move || dismiss(id));
    close.add_event_listener_with_callback("click", on_close.as_ref().unchecked_ref())?;
    on_close.forget();

    panel.append_child(&title)?;
    panel.append_child(&message)?;
    panel.append_child(&close)?;
    Ok(panel)
}
