// File: src/submission/outcome.rs
// Purpose: Interpreting a response into a submission outcome

use serde_json::{Map, Value};

use super::transport::HttpResponse;

/// Fields read from a JSON response body. Anything else is ignored.
///
/// Each key is read on its own, so a key of an unexpected type is skipped
/// without losing the rest of the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseBody {
    pub redirect: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
    /// `_toast.message` as attached by server-side JSON builders
    pub toast_message: Option<String>,
}

impl ResponseBody {
    /// Decode a body, substituting the empty body when it is not a JSON object
    pub fn parse(raw: &str) -> Self {
        let map = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                tracing::debug!("response body is JSON but not an object");
                return Self::default();
            }
            Err(err) => {
                if !raw.trim().is_empty() {
                    tracing::debug!("response body is not JSON: {}", err);
                }
                return Self::default();
            }
        };

        Self {
            redirect: text(&map, "redirect").or_else(|| text(&map, "redirectUrl")),
            message: text(&map, "message"),
            error: text(&map, "error"),
            toast_message: map
                .get("_toast")
                .and_then(Value::as_object)
                .and_then(|hint| text(hint, "message")),
        }
    }

    /// User-facing message: `message`, then `_toast.message`, then `error`
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.toast_message.as_deref())
            .or(self.error.as_deref())
    }

    pub fn redirect(&self) -> Option<&str> {
        self.redirect.as_deref()
    }
}

/// Non-blank string value of `key`; other JSON types count as absent
fn text(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Resolved result of one submission cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded {
        redirect: Option<String>,
        message: Option<String>,
    },
    Failed {
        message: Option<String>,
    },
}

impl Outcome {
    pub fn from_response(response: &HttpResponse) -> Self {
        let body = ResponseBody::parse(&response.body);
        let message = body.message().map(str::to_string);

        if response.is_success() {
            Outcome::Succeeded {
                redirect: body.redirect().map(str::to_string),
                message,
            }
        } else {
            Outcome::Failed { message }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_success_with_redirect() {
        let outcome = Outcome::from_response(&HttpResponse::new(
            200,
            r#"{"redirect": "/done", "message": "Saved"}"#,
        ));
        assert_eq!(
            outcome,
            Outcome::Succeeded {
                redirect: Some("/done".into()),
                message: Some("Saved".into()),
            }
        );
    }

    #[test]
    fn test_redirect_url_alias() {
        let body = ResponseBody::parse(
            r#"{"success": true, "message": "Student logged in successfully", "redirectUrl": "/student-dashboard"}"#,
        );
        assert_eq!(body.redirect(), Some("/student-dashboard"));
    }

    #[test]
    fn test_failure_message_from_body() {
        let outcome =
            Outcome::from_response(&HttpResponse::new(422, r#"{"message":"bad input"}"#));
        assert_eq!(
            outcome,
            Outcome::Failed {
                message: Some("bad input".into())
            }
        );
    }

    #[test]
    fn test_failure_falls_back_to_error_key() {
        let outcome =
            Outcome::from_response(&HttpResponse::new(500, r#"{"error":"database locked"}"#));
        assert_eq!(
            outcome,
            Outcome::Failed {
                message: Some("database locked".into())
            }
        );
    }

    #[test]
    fn test_toast_hint_message() {
        let body = ResponseBody::parse(r#"{"_toast": {"message": "Queued", "type": "info"}}"#);
        assert_eq!(body.message(), Some("Queued"));
    }

    #[test]
    fn test_boolean_error_keeps_message() {
        let outcome = Outcome::from_response(&HttpResponse::new(
            400,
            r#"{"error": true, "message": "bad input"}"#,
        ));
        assert_eq!(
            outcome,
            Outcome::Failed {
                message: Some("bad input".into())
            }
        );
    }

    #[test]
    fn test_object_error_keeps_message() {
        let outcome = Outcome::from_response(&HttpResponse::new(
            422,
            r#"{"message": "bad input", "error": {"field": "email"}}"#,
        ));
        assert_eq!(
            outcome,
            Outcome::Failed {
                message: Some("bad input".into())
            }
        );
    }

    #[test]
    fn test_redirect_and_redirect_url_together() {
        let outcome = Outcome::from_response(&HttpResponse::new(
            200,
            r#"{"redirect": "/done", "redirectUrl": "/elsewhere"}"#,
        ));
        assert_eq!(
            outcome,
            Outcome::Succeeded {
                redirect: Some("/done".into()),
                message: None,
            }
        );
    }

    #[test]
    fn test_blank_redirect_falls_back_to_redirect_url() {
        let body = ResponseBody::parse(r#"{"redirect": "", "redirectUrl": "/next"}"#);
        assert_eq!(body.redirect(), Some("/next"));
    }

    #[test]
    fn test_non_string_toast_hint_is_ignored() {
        let body = ResponseBody::parse(r#"{"_toast": "Queued", "error": "locked"}"#);
        assert_eq!(body.message(), Some("locked"));
    }

    #[test]
    fn test_unparsable_body_is_empty() {
        assert_eq!(ResponseBody::parse("<html>oops</html>"), ResponseBody::default());
        assert_eq!(ResponseBody::parse(""), ResponseBody::default());
        assert_eq!(ResponseBody::parse("[1,2,3]"), ResponseBody::default());

        let outcome = Outcome::from_response(&HttpResponse::new(502, "Bad Gateway"));
        assert_eq!(outcome, Outcome::Failed { message: None });
    }

    #[test]
    fn test_blank_values_are_absent() {
        let body = ResponseBody::parse(r#"{"redirect": "  ", "message": ""}"#);
        assert_eq!(body.redirect(), None);
        assert_eq!(body.message(), None);
    }
}
