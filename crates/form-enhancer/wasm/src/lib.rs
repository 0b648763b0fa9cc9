//! Form Enhancer WASM
//!
//! Browser bindings for the form enhancer. Attaches validation, async
//! submission, loading state and toast notifications to every form matching
//! a selector.
//!
//! # Example (JavaScript)
//! ```javascript
//! import init, { initFormEnhancer, showToast } from './form_enhancer_wasm.js';
//!
//! await init();
//! initFormEnhancer({ formSelector: 'form[data-enhance]', toastDurationMs: 4000 });
//! showToast('Welcome', 'Signed in', 'success', 3000);
//! ```

pub mod discovery;
pub mod dom;
pub mod fetch;
pub mod page;
pub mod toast;

use std::rc::Rc;

use form_enhancer_core::{EnhancerConfig, Severity, Toast, ToastId, ToastLifetime};
use wasm_bindgen::prelude::*;
use web_sys::Document;

/// Set panic hook and logging for better error messages in the browser
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A host page may already have installed a subscriber
    let _ = tracing_wasm::try_set_as_global_default();
}

/// Inject styles and enhance matching forms.
///
/// `config` is an optional object with camelCase keys; missing keys keep
/// their defaults. If the document is still loading, discovery waits for
/// `DOMContentLoaded` and this returns 0.
#[wasm_bindgen(js_name = initFormEnhancer)]
pub fn init_form_enhancer(config: JsValue) -> Result<u32, JsValue> {
    let config: EnhancerConfig = if config.is_undefined() || config.is_null() {
        EnhancerConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
    };
    let config = Rc::new(config);

    let document = page::document()?;
    page::ensure_styles(&document).map_err(page::host_error)?;

    if document.ready_state() == "loading" {
        let deferred = document.clone();
        let on_ready = Closure::once_into_js(move || {
            if let Err(e) = enhance_ready(&deferred, config) {
                tracing::error!("form enhancer init failed: {}", page::js_error(&e));
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        return Ok(0);
    }

    enhance_ready(&document, config)
}

fn enhance_ready(document: &Document, config: Rc<EnhancerConfig>) -> Result<u32, JsValue> {
    page::toast_container(document).map_err(page::host_error)?;
    discovery::enhance_all(document, config)
}

/// Show a toast from page scripts.
///
/// `severity` is `info`, `success` or `error`; `durationMs` of zero or less
/// keeps the toast until closed, and `undefined` uses 5000ms. Returns the
/// toast id for `dismissToast`.
#[wasm_bindgen(js_name = showToast)]
pub fn show_toast(
    title: Option<String>,
    message: &str,
    severity: Option<String>,
    duration_ms: Option<f64>,
) -> Result<f64, JsValue> {
    let severity = severity.as_deref().map(Severity::parse).unwrap_or_default();
    let lifetime = duration_ms
        .map(|ms| ToastLifetime::from_millis(ms as i64))
        .unwrap_or_default();

    let mut toast = Toast::new(severity, message).with_lifetime(lifetime);
    if let Some(title) = title {
        toast = toast.with_title(title);
    }

    let id = toast::show(toast)?;
    Ok(id.0 as f64)
}

/// Close a toast by id. Closing one that is already gone does nothing.
#[wasm_bindgen(js_name = dismissToast)]
pub fn dismiss_toast(id: f64) {
    toast::dismiss(ToastId(id as u64));
}
