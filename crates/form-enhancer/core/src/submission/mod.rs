//! Per-form submission state machine
//!
//! `Idle -> Submitting -> {Succeeded, Failed} -> Idle`. A submit that fails
//! validation never leaves `Idle`. Loading is raised on entry to
//! `Submitting` and lowered by a drop guard, so every exit path (outcome,
//! transport error, or the future being dropped) clears it.

pub mod outcome;
pub mod transport;

pub use outcome::{Outcome, ResponseBody};
pub use transport::{HttpResponse, SubmitRequest, Transport, TransportError, REQUESTED_WITH};

use std::cell::Cell;

use crate::config::EnhancerConfig;
use crate::feedback::Toast;
use crate::model::{Field, FieldId, FormModel};
use crate::validation::{self, Rules};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// What a call to [`FormController::submit`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// A submission was already in flight
    Ignored,
    /// Validation failed; nothing was sent
    Invalid,
    Completed(Outcome),
}

/// Presentation of one managed form.
///
/// The browser implements this over the DOM; tests implement it in memory.
pub trait FormView {
    /// Current field values and attributes. Annotations are not read back.
    fn snapshot(&self) -> FormModel;

    /// Project every field's annotation, clearing fields without an error
    fn render_validity(&self, form: &FormModel);

    /// Project one field's annotation
    fn render_field(&self, id: FieldId, field: &Field);

    fn set_loading(&self, loading: bool);

    fn notify(&self, toast: Toast);

    fn navigate(&self, url: &str);

    /// Empty every field value and annotation, as [`FormModel::reset`] does.
    /// Hidden inputs keep their values.
    fn reset_fields(&self);

    /// URL used when the form has no action
    fn page_url(&self) -> String;
}

/// Validation and submission behavior for one managed form
#[derive(Debug)]
pub struct FormController {
    config: EnhancerConfig,
    rules: Rules,
    state: Cell<SubmissionState>,
}

impl FormController {
    pub fn new(config: EnhancerConfig) -> Self {
        let rules = config.rules();
        Self {
            config,
            rules,
            state: Cell::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.get()
    }

    pub fn config(&self) -> &EnhancerConfig {
        &self.config
    }

    fn transition(&self, to: SubmissionState) {
        let from = self.state.replace(to);
        tracing::debug!(?from, ?to, "submission state");
    }

    /// Focus left a field: apply its rules and project the result
    pub fn blur<V: FormView>(&self, view: &V, id: FieldId) -> bool {
        let mut form = view.snapshot();
        let valid = validation::validate_field_on_blur(&mut form, id, &self.rules);
        if let Some(field) = form.get(id) {
            view.render_field(id, field);
        }
        valid
    }

    /// The user typed into a field: drop its annotation without re-validating
    pub fn input<V: FormView>(&self, view: &V, id: FieldId) {
        let mut form = view.snapshot();
        validation::clear_field_validation(&mut form, id);
        if let Some(field) = form.get(id) {
            view.render_field(id, field);
        }
    }

    /// Validate the form and, if valid, send it and apply the outcome
    pub async fn submit<T, V>(&self, transport: &T, view: &V) -> SubmitResult
    where
        T: Transport,
        V: FormView,
    {
        if self.state.get() == SubmissionState::Submitting {
            tracing::debug!("submission already in flight, ignoring");
            return SubmitResult::Ignored;
        }

        let mut form = view.snapshot();
        let valid = validation::validate(&mut form, &self.rules);
        view.render_validity(&form);
        if !valid {
            tracing::debug!("submission blocked by validation");
            return SubmitResult::Invalid;
        }

        let request = SubmitRequest::from_form(&form, &view.page_url());
        tracing::info!(method = %request.method, url = %request.url, "submitting form");

        let guard = InFlight::enter(self, view);
        let outcome = match transport.send(request).await {
            Ok(response) => {
                tracing::debug!(status = response.status, "response received");
                Outcome::from_response(&response)
            }
            Err(err) => {
                tracing::warn!("submission failed: {}", err);
                Outcome::Failed { message: None }
            }
        };

        self.transition(if outcome.is_success() {
            SubmissionState::Succeeded
        } else {
            SubmissionState::Failed
        });
        self.apply(&outcome, &form, view);
        drop(guard);

        SubmitResult::Completed(outcome)
    }

    fn apply<V: FormView>(&self, outcome: &Outcome, form: &FormModel, view: &V) {
        let lifetime = self.config.toast_lifetime();
        match outcome {
            Outcome::Succeeded { redirect, message } => {
                tracing::info!(redirect = ?redirect, "submission succeeded");
                let text = message.as_deref().unwrap_or(&self.config.success_message);
                view.notify(Toast::success(text).with_lifetime(lifetime));

                if let Some(url) = redirect {
                    view.navigate(url);
                } else if form.reset_on_success {
                    view.reset_fields();
                }
            }
            Outcome::Failed { message } => {
                tracing::info!("submission failed");
                let text = message.as_deref().unwrap_or(&self.config.error_message);
                view.notify(Toast::error(text).with_lifetime(lifetime));
            }
        }
    }
}

/// Holds the form in `Submitting` with loading raised; dropping it
/// lowers loading and returns the machine to `Idle`.
struct InFlight<'a, V: FormView> {
    controller: &'a FormController,
    view: &'a V,
}

impl<'a, V: FormView> InFlight<'a, V> {
    fn enter(controller: &'a FormController, view: &'a V) -> Self {
        controller.transition(SubmissionState::Submitting);
        view.set_loading(true);
        Self { controller, view }
    }
}

impl<V: FormView> Drop for InFlight<'_, V> {
    fn drop(&mut self) {
        self.view.set_loading(false);
        self.controller.transition(SubmissionState::Idle);
    }
}
