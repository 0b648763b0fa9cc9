//! Form Enhancer Core
//!
//! In-memory model for enhanced HTML forms: field validity, the per-form
//! submission state machine, and the loading/toast feedback it drives.
//! Nothing here touches the DOM; the browser crate projects this state onto
//! the page through [`FormView`] and [`PageHost`].

pub mod config;
pub mod feedback;
pub mod model;
pub mod submission;
pub mod validation;

pub use config::EnhancerConfig;
pub use feedback::{
    ensure_singleton, HostError, LoadingLabel, PageHost, Severity, SingletonSpec, Toast, ToastId,
    ToastLifetime, ToastStack,
};
pub use model::{Field, FieldId, FieldKind, FormModel};
pub use submission::{
    FormController, FormView, HttpResponse, Outcome, ResponseBody, SubmissionState, SubmitRequest,
    SubmitResult, Transport, TransportError,
};
pub use validation::{Rules, ValidationError};
