// File: src/submission/transport.rs
// Purpose: Outbound request/response types and the transport seam

use thiserror::Error;

use crate::model::FormModel;

/// Header marking the request as an asynchronous form submission
pub const REQUESTED_WITH: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("could not build request: {0}")]
    Request(String),
    #[error("network error: {0}")]
    Network(String),
}

/// One submission, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub url: String,
    pub method: String,
    /// Named non-file fields; the browser transport sends the full multipart form
    pub payload: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl SubmitRequest {
    pub fn from_form(form: &FormModel, page_url: &str) -> Self {
        let (url, method) = form.target(page_url);
        Self {
            url,
            method,
            payload: form.payload(),
            headers: vec![(REQUESTED_WITH.0.to_string(), REQUESTED_WITH.1.to_string())],
        }
    }
}

/// Status and raw body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Sends a submission and resolves with the server's response
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: SubmitRequest) -> Result<HttpResponse, TransportError>;
}
