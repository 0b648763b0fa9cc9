//! Loading indicator and toast notification state

pub mod loading;
pub mod page;
pub mod toast;

pub use loading::{ControlSnapshot, LoadingLabel};
pub use page::{
    ensure_singleton, HostError, PageHost, Parent, SingletonSpec, STYLESHEET, STYLE_BLOCK,
    TOAST_CONTAINER,
};
pub use toast::{Severity, Toast, ToastId, ToastLifetime, ToastStack};

/// CSS classes and data attributes shared with the stylesheet
pub mod classes {
    pub const INVALID: &str = "is-invalid";
    pub const FEEDBACK: &str = "invalid-feedback";
    pub const LOADING: &str = "is-loading";
    pub const SPINNER: &str = "fe-spinner";
    pub const TOAST: &str = "fe-toast";
    pub const TOAST_TITLE: &str = "fe-toast-title";
    pub const TOAST_MESSAGE: &str = "fe-toast-message";
    pub const TOAST_CLOSE: &str = "fe-toast-close";
    pub const TOAST_LEAVING: &str = "fe-toast-leaving";

    /// Marks a form that already has listeners attached
    pub const ENHANCED_ATTR: &str = "data-enhanced";
    pub const TOAST_ID_ATTR: &str = "data-toast-id";
}
