//! Browser tests for the DOM projection.
//!
//! Run with `wasm-pack test --headless --chrome crates/form-enhancer/wasm`.
#![cfg(target_arch = "wasm32")]

use std::rc::Rc;
use std::time::Duration;

use form_enhancer_core::{
    EnhancerConfig, FieldKind, FormController, FormView, Toast, ToastLifetime, ValidationError,
};
use form_enhancer_wasm::dom::DomFormView;
use form_enhancer_wasm::{init_form_enhancer, page, toast};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use web_sys::{
    Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
};

wasm_bindgen_test_configure!(run_in_browser);

const SIGNUP: &str = r#"
    <input name="name" required>
    <input name="email" type="email" required>
    <input name="password" type="password" required data-min-length="6">
    <input name="password_confirm" type="password" required data-confirm>
    <input name="certificate" type="file" data-allowed-extensions="pdf, png">
    <select name="grade"><option value="10">10</option></select>
    <button type="submit">Sign <b>up</b></button>
"#;

fn mount(id: &str, inner: &str) -> HtmlFormElement {
    let document = page::document().unwrap();
    let form = document.create_element("form").unwrap();
    form.set_id(id);
    form.set_attribute("data-enhance", "").unwrap();
    form.set_attribute("action", "/register").unwrap();
    form.set_inner_html(inner);
    document.body().unwrap().append_child(&form).unwrap();
    form.dyn_into().unwrap()
}

fn view_for(form: &HtmlFormElement) -> DomFormView {
    let submit = form
        .query_selector("button[type=submit]")
        .unwrap()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    DomFormView::new(form.clone(), submit, Rc::new(EnhancerConfig::default()))
}

fn set(form: &HtmlFormElement, name: &str, value: &str) {
    let input: HtmlInputElement = form
        .query_selector(&format!("[name={name}]"))
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    input.set_value(value);
}

fn count(selector: &str) -> u32 {
    page::document()
        .unwrap()
        .query_selector_all(selector)
        .unwrap()
        .length()
}

fn feedback_after(form: &HtmlFormElement, name: &str) -> Option<Element> {
    form.query_selector(&format!("[name={name}] + .invalid-feedback"))
        .unwrap()
}

#[wasm_bindgen_test]
fn snapshot_reads_dom_contract() {
    let form = mount("snapshot", SIGNUP);
    form.set_attribute("data-reset-on-success", "").unwrap();
    set(&form, "email", "ada@example.com");

    let model = view_for(&form).snapshot();

    assert_eq!(model.action.as_deref(), Some("/register"));
    assert!(model.reset_on_success);
    assert_eq!(model.fields.len(), 6);
    assert_eq!(model.fields[1].kind, FieldKind::Email);
    assert_eq!(model.fields[1].value, "ada@example.com");
    assert_eq!(model.fields[2].min_length, Some(6));
    assert!(model.fields[3].confirm);
    assert_eq!(model.fields[4].allowed_extensions, vec!["pdf", "png"]);
    assert_eq!(model.fields[5].value, "10");
    form.remove();
}

#[wasm_bindgen_test]
fn annotations_are_replaced_not_stacked() {
    let form = mount("annotate", SIGNUP);
    let view = view_for(&form);
    let controller = FormController::new(EnhancerConfig::default());
    let email = view.snapshot().find("email").unwrap();

    set(&form, "email", "nope");
    assert!(!controller.blur(&view, email));
    set(&form, "email", "");
    assert!(!controller.blur(&view, email));

    assert_eq!(count("#annotate .invalid-feedback"), 1);
    let message = feedback_after(&form, "email").unwrap().text_content();
    assert_eq!(message, Some(ValidationError::Required.to_string()));

    controller.input(&view, email);
    assert!(feedback_after(&form, "email").is_none());
    form.remove();
}

#[wasm_bindgen_test]
fn loading_restores_original_label() {
    let form = mount("loading", SIGNUP);
    let view = view_for(&form);
    let button: HtmlElement = form
        .query_selector("button")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();

    for _ in 0..2 {
        view.set_loading(true);
        assert!(button.has_attribute("disabled"));
        assert!(form.class_list().contains("is-loading"));
        assert_eq!(count("#loading .fe-spinner"), 1);

        view.set_loading(false);
        assert!(!button.has_attribute("disabled"));
        assert!(!form.class_list().contains("is-loading"));
        assert_eq!(button.inner_html(), "Sign <b>up</b>");
    }
    form.remove();
}

#[wasm_bindgen_test]
fn init_twice_keeps_singletons() {
    let form = mount("init", SIGNUP);

    let first = init_form_enhancer(JsValue::UNDEFINED).unwrap();
    let second = init_form_enhancer(JsValue::UNDEFINED).unwrap();

    assert!(first >= 1);
    assert_eq!(second, 0);
    assert!(form.has_attribute("data-enhanced"));
    assert_eq!(count("#form-enhancer-styles"), 1);
    assert_eq!(count("#toast-container"), 1);
    form.remove();
}

#[wasm_bindgen_test]
fn sticky_toast_stays_until_dismissed() {
    let before = toast::live_count();
    let id = toast::show(Toast::error("stays").with_lifetime(ToastLifetime::Sticky)).unwrap();
    let selector = format!("[data-toast-id=\"{}\"]", id);

    assert_eq!(toast::live_count(), before + 1);
    assert_eq!(count(&selector), 1);

    toast::dismiss(id);
    toast::dismiss(id);
    assert_eq!(toast::live_count(), before);

    let panel = page::document().unwrap().query_selector(&selector).unwrap().unwrap();
    assert!(panel.class_list().contains("fe-toast-leaving"));
}

#[wasm_bindgen_test]
fn reset_empties_prefilled_fields() {
    let form = mount(
        "reset",
        r#"
        <input name="csrf" type="hidden" value="t0k3n">
        <input name="nickname" value="x" required>
        <input name="terms" type="checkbox" checked>
        <textarea name="bio">hello</textarea>
        <select name="grade"><option value="9">9</option><option value="10" selected>10</option></select>
        "#,
    );
    let view = view_for(&form);
    set(&form, "nickname", "");
    let controller = FormController::new(EnhancerConfig::default());
    let nickname = view.snapshot().find("nickname").unwrap();
    assert!(!controller.blur(&view, nickname));

    view.reset_fields();

    let field = |name: &str| form.query_selector(&format!("[name={name}]")).unwrap().unwrap();
    let input = |name: &str| field(name).dyn_into::<HtmlInputElement>().unwrap();
    assert_eq!(input("nickname").value(), "");
    assert_eq!(input("csrf").value(), "t0k3n");
    assert!(!input("terms").checked());
    assert_eq!(field("bio").dyn_into::<HtmlTextAreaElement>().unwrap().value(), "");
    assert_eq!(field("grade").dyn_into::<HtmlSelectElement>().unwrap().value(), "");
    assert!(feedback_after(&form, "nickname").is_none());
    assert!(!input("nickname").class_list().contains("is-invalid"));
    form.remove();
}

#[wasm_bindgen_test]
fn form_without_submit_control_shows_spinner() {
    let form = mount("no-submit", r#"<input name="q" required>"#);
    let view = DomFormView::new(form.clone(), None, Rc::new(EnhancerConfig::default()));

    for _ in 0..2 {
        view.set_loading(true);
        assert!(form.class_list().contains("is-loading"));
        assert_eq!(count("#no-submit .fe-spinner"), 1);

        view.set_loading(false);
        assert!(!form.class_list().contains("is-loading"));
        assert_eq!(count("#no-submit .fe-spinner"), 0);
    }
    form.remove();
}

#[wasm_bindgen_test]
async fn timed_toast_is_removed_after_its_duration() {
    let before = toast::live_count();
    let lifetime = ToastLifetime::Timed(Duration::from_millis(50));
    let id = toast::show(Toast::info("brief").with_lifetime(lifetime)).unwrap();
    let selector = format!("[data-toast-id=\"{}\"]", id);

    assert_eq!(toast::live_count(), before + 1);
    assert_eq!(count(&selector), 1);

    // duration, then the exit animation, plus slack
    TimeoutFuture::new(50 + 300 + 200).await;

    assert_eq!(toast::live_count(), before);
    assert_eq!(count(&selector), 0);
}
