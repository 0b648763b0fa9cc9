// File: src/fetch.rs
// Purpose: `Transport` over `window.fetch`

use form_enhancer_core::{HttpResponse, SubmitRequest, Transport, TransportError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, HtmlFormElement, Request, RequestInit, Response};

use crate::page::{js_error, window};

/// Sends a managed form with `fetch`.
///
/// Bodies are the form's native multipart `FormData`, files included.
/// GET and HEAD cannot carry a body, so their fields go in the query string.
pub struct FetchTransport {
    form: HtmlFormElement,
}

impl FetchTransport {
    pub fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }

    fn build(&self, request: &SubmitRequest) -> Result<Request, JsValue> {
        let init = RequestInit::new();
        init.set_method(&request.method);

        let url = if matches!(request.method.as_str(), "GET" | "HEAD") {
            with_query(&request.url, &request.payload)
        } else {
            let body = FormData::new_with_form(&self.form)?;
            init.set_body(&body);
            request.url.clone()
        };

        let req = Request::new_with_str_and_init(&url, &init)?;
        for (name, value) in &request.headers {
            req.headers().set(name, value)?;
        }
        Ok(req)
    }
}

impl Transport for FetchTransport {
    async fn send(&self, request: SubmitRequest) -> Result<HttpResponse, TransportError> {
        let window = window().map_err(|e| TransportError::Request(js_error(&e)))?;
        let req = self
            .build(&request)
            .map_err(|e| TransportError::Request(js_error(&e)))?;

        let value = JsFuture::from(window.fetch_with_request(&req))
            .await
            .map_err(|e| TransportError::Network(js_error(&e)))?;
        let response: Response = value
            .dyn_into()
            .map_err(|_| TransportError::Network("fetch did not resolve to a Response".into()))?;

        // An unreadable body is treated as empty
        let body = match response.text() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default(),
            Err(_) => String::new(),
        };

        Ok(HttpResponse::new(response.status(), body))
    }
}

fn with_query(url: &str, payload: &[(String, String)]) -> String {
    if payload.is_empty() {
        return url.to_string();
    }

    let query = payload
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_with_query() {
        assert_eq!(with_query("/search", &[]), "/search");
        assert_eq!(
            with_query("/search", &pairs(&[("q", "a b"), ("grade", "10")])),
            "/search?q=a%20b&grade=10"
        );
        assert_eq!(
            with_query("/search?page=2", &pairs(&[("q", "x&y")])),
            "/search?page=2&q=x%26y"
        );
    }
}
