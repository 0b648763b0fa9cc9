// File: src/feedback/page.rs
// Purpose: Page-wide singletons (injected stylesheet, toast container)

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("document has no <{0}> to attach to")]
    MissingParent(&'static str),
    #[error("failed to create <{tag}>: {reason}")]
    Create { tag: &'static str, reason: String },
}

/// Where a singleton element is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    Head,
    Body,
}

/// A page element that must exist at most once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingletonSpec {
    pub id: &'static str,
    pub tag: &'static str,
    pub parent: Parent,
    pub class: Option<&'static str>,
    pub text: Option<&'static str>,
}

/// Shared stylesheet for loading and toast visuals
pub const STYLE_BLOCK: SingletonSpec = SingletonSpec {
    id: "form-enhancer-styles",
    tag: "style",
    parent: Parent::Head,
    class: None,
    text: Some(STYLESHEET),
};

/// Overlay that owns every toast on the page
pub const TOAST_CONTAINER: SingletonSpec = SingletonSpec {
    id: "toast-container",
    tag: "div",
    parent: Parent::Body,
    class: Some("fe-toast-container"),
    text: None,
};

/// The document the singletons live in
pub trait PageHost {
    type Node;

    fn find_by_id(&self, id: &str) -> Option<Self::Node>;

    fn create(&self, spec: &SingletonSpec) -> Result<Self::Node, HostError>;
}

/// Return the element described by `spec`, creating it only if absent
pub fn ensure_singleton<H: PageHost>(host: &H, spec: &SingletonSpec) -> Result<H::Node, HostError> {
    if let Some(existing) = host.find_by_id(spec.id) {
        return Ok(existing);
    }
    tracing::debug!(id = spec.id, tag = spec.tag, "creating page singleton");
    host.create(spec)
}

pub const STYLESHEET: &str = r#"
.is-invalid { border-color: #dc3545 !important; }
.invalid-feedback { display: block; margin-top: .25rem; font-size: .875em; color: #dc3545; }
form.is-loading { position: relative; pointer-events: none; opacity: .7; }
button.is-loading { cursor: progress; }
.fe-spinner {
  display: inline-block; width: 1em; height: 1em; margin-left: .5em; vertical-align: -.125em;
  border: .15em solid currentColor; border-right-color: transparent; border-radius: 50%;
  animation: fe-spin .75s linear infinite;
}
@keyframes fe-spin { to { transform: rotate(360deg); } }
.fe-toast-container {
  position: fixed; top: 1rem; right: 1rem; z-index: 1080;
  display: flex; flex-direction: column; gap: .5rem; max-width: 360px;
}
.fe-toast {
  position: relative; padding: .75rem 2.25rem .75rem 1rem; border-radius: .375rem;
  background: #fff; border-left: 4px solid #0d6efd; box-shadow: 0 .5rem 1rem rgba(0,0,0,.15);
  animation: fe-toast-in .3s ease-out;
}
.fe-toast-success { border-left-color: #198754; }
.fe-toast-error { border-left-color: #dc3545; }
.fe-toast-info { border-left-color: #0d6efd; }
.fe-toast-title { font-weight: 600; margin-bottom: .25rem; }
.fe-toast-close {
  position: absolute; top: .5rem; right: .5rem; border: 0; background: none;
  font-size: 1.25rem; line-height: 1; cursor: pointer;
}
.fe-toast-leaving { animation: fe-toast-out .3s ease-in forwards; }
@keyframes fe-toast-in { from { opacity: 0; transform: translateX(100%); } to { opacity: 1; transform: none; } }
@keyframes fe-toast-out { to { opacity: 0; transform: translateX(100%); } }
"#;
