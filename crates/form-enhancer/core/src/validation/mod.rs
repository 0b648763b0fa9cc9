//! Field and form validation
//!
//! Every function here works on a [`FormModel`] and rewrites the `error`
//! annotation of the fields it inspects. Presentation reads those
//! annotations back; nothing is cached beyond them.

pub mod email;
pub mod file;
pub mod password;

pub use email::is_valid_email;
pub use file::has_allowed_extension;
pub use password::check_min_length;

use thiserror::Error;

use crate::model::{Field, FieldId, FieldKind, FormModel};

/// Why a field is invalid. `Display` is the message shown next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("This field is required.")]
    Required,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Password must be at least {min} characters.")]
    TooShort { min: usize },
    #[error("Passwords do not match.")]
    Mismatch,
    #[error("Allowed file types: {allowed}.")]
    DisallowedExtension { allowed: String },
}

/// Form-wide validation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    pub min_password_length: usize,
    /// Default allow-list for file inputs, lower-cased, without dots
    pub allowed_extensions: Vec<String>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            min_password_length: 8,
            allowed_extensions: Vec::new(),
        }
    }
}

/// Apply the per-field rules to one field.
///
/// Precedence: required-empty, email format, password length, file type.
/// An empty optional field is always valid.
pub fn check_field(field: &Field, rules: &Rules) -> Result<(), ValidationError> {
    let value = field.value.trim();
    if value.is_empty() {
        return if field.required {
            Err(ValidationError::Required)
        } else {
            Ok(())
        };
    }

    match field.kind {
        FieldKind::Email if !is_valid_email(value) => Err(ValidationError::InvalidEmail),
        FieldKind::Password => check_min_length(
            &field.value,
            field.min_length.unwrap_or(rules.min_password_length),
        ),
        FieldKind::File => {
            let allowed = if field.allowed_extensions.is_empty() {
                &rules.allowed_extensions
            } else {
                &field.allowed_extensions
            };
            if value.lines().all(|name| has_allowed_extension(name.trim(), allowed)) {
                Ok(())
            } else {
                Err(ValidationError::DisallowedExtension {
                    allowed: allowed.join(", "),
                })
            }
        }
        _ => Ok(()),
    }
}

/// Validate every required field, then the password-confirmation rule.
///
/// Each field's annotation is replaced: failing fields get their message,
/// fields that no longer fail are cleared. Returns true iff nothing failed.
pub fn validate(form: &mut FormModel, rules: &Rules) -> bool {
    for field in &mut form.fields {
        field.error = if field.required {
            check_field(field, rules).err()
        } else {
            None
        };
    }

    if let Some(id) = confirmation_mismatch(form) {
        if let Some(field) = form.get_mut(id) {
            if field.error.is_none() {
                field.error = Some(ValidationError::Mismatch);
            }
        }
    }

    let invalid = form.invalid_fields().count();
    tracing::debug!(invalid, "form validated");
    invalid == 0
}

/// Validate a single field when focus leaves it.
///
/// Runs the per-field rules for required fields. A confirmation field that
/// passes them is also checked against the primary password.
pub fn validate_field_on_blur(form: &mut FormModel, id: FieldId, rules: &Rules) -> bool {
    let Some(field) = form.get(id) else {
        return true;
    };

    let mut error = if field.required {
        check_field(field, rules).err()
    } else {
        None
    };

    if error.is_none() && confirmation_mismatch(form) == Some(id) {
        error = Some(ValidationError::Mismatch);
    }

    let valid = error.is_none();
    if let Some(field) = form.get_mut(id) {
        field.error = error;
    }
    valid
}

/// Drop the annotation on one field without re-validating anything
pub fn clear_field_validation(form: &mut FormModel, id: FieldId) {
    if let Some(field) = form.get_mut(id) {
        field.error = None;
    }
}

/// The confirmation field's id when it disagrees with the primary password.
///
/// The primary is the first password field not marked confirm; the
/// confirmation is the first password field marked confirm.
fn confirmation_mismatch(form: &FormModel) -> Option<FieldId> {
    let passwords = || {
        form.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.kind == FieldKind::Password)
    };

    let primary = passwords().find(|(_, f)| !f.confirm);
    let confirmation = passwords().find(|(_, f)| f.confirm)?;

    password::confirmation_differs(
        primary.map(|(_, f)| f.value.as_str()),
        Some(confirmation.1.value.as_str()),
    )
    .then_some(FieldId(confirmation.0))
}
