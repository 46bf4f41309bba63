//! REST transport for the portal's JSON endpoints.
//!
//! Browser (`browser` feature): real HTTP calls via `gloo-net`.
//! Native builds: only the request/response model, driven by test doubles.
//!
//! ERROR HANDLING
//! ==============
//! Form endpoints are read as JSON whatever their HTTP status, because the
//! server reports validation failures as `{"error": ...}` bodies on 4xx/5xx.
//! The comment feed instead requires a 2xx status ([`expect_ok`]).
//!
//! There is no timeout and no cancellation: a request stays pending until the
//! browser resolves or rejects it.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fully described request, built before any I/O happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self { method: Method::Get, url: url.into(), headers: Vec::new(), body: None }
    }

    /// `POST` with a JSON body and the given `Authorization` value (sent even when empty).
    #[must_use]
    pub fn post_json(url: impl Into<String>, authorization: impl Into<String>, body: String) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: vec![
                ("Content-Type".to_owned(), "application/json".to_owned()),
                ("Authorization".to_owned(), authorization.into()),
            ],
            body: Some(body),
        }
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response: status plus the unparsed body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Fail with [`ClientError::Status`] unless the response is 2xx.
///
/// # Errors
///
/// Returns [`ClientError::Status`] for any non-2xx status.
pub fn expect_ok(response: ApiResponse) -> Result<ApiResponse, ClientError> {
    if response.ok() { Ok(response) } else { Err(ClientError::Status(response.status)) }
}

/// Sends one request and resolves with its response.
#[allow(async_fn_in_trait)]
pub trait Api {
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when no response was received.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

/// Result of a form endpoint, classified by its `error` field.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    /// The body carried a truthy `error`; the message is ready to show.
    Rejected(String),
    Accepted(Value),
}

impl ApiOutcome {
    /// Classify a parsed form response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnexpectedBody`] for a `null` body, which has no
    /// `error` field to inspect.
    pub fn from_value(value: Value) -> Result<Self, ClientError> {
        if value.is_null() {
            return Err(ClientError::UnexpectedBody("null"));
        }
        Ok(match value.get("error") {
            Some(error) if is_truthy(error) => Self::Rejected(error_message(error)),
            _ => Self::Accepted(value),
        })
    }
}

/// JavaScript truthiness of a JSON value.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn error_message(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `fetch` through `gloo-net`.
#[cfg(feature = "browser")]
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooApi;

#[cfg(feature = "browser")]
impl Api for GlooApi {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        use gloo_net::http::Request;

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let response = match request.body {
            Some(body) => builder
                .body(body)
                .map_err(|e| ClientError::Transport(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(ApiResponse { status, body })
    }
}
