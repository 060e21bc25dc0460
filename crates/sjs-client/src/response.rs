//! Drained HTTP responses and status interpretation.
//!
//! Every response is read to the end as soon as it arrives and the
//! underlying transport response is dropped, so an attempt never holds a
//! connection past the point where its body is interpreted.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{error, warn};

use crate::endpoint::Endpoint;
use crate::error::{Error, ErrorKind, Result};

/// A fully read job server response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    body: String,
}

impl Response {
    /// Build a response from an already known status and body.
    pub fn from_parts(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Read the whole body of a transport response.
    ///
    /// A body that cannot be read is logged and treated as empty.
    pub(crate) async fn drain(inner: reqwest::Response) -> Self {
        let status = inner.status().as_u16();
        let body = match inner.text().await {
            Ok(text) => text.trim().to_string(),
            Err(err) => {
                warn!(status, error = %err, "Error occurs when trying to read response");
                String::new()
            }
        };
        Self { status, body }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The trimmed response body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consume the response, returning its body.
    pub fn into_body(self) -> String {
        self.body
    }

    /// Returns true for `200 OK`.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Returns true for `202 Accepted`.
    pub fn is_accepted(&self) -> bool {
        self.status == 202
    }

    /// Returns true for `404 Not Found`.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }

    /// Deserialize the body as a JSON object.
    pub fn json_object(&self) -> Result<Map<String, Value>> {
        match serde_json::from_str::<Value>(&self.body)? {
            Value::Object(map) => Ok(map),
            other => Err(Error::new(ErrorKind::Json(format!(
                "expected a JSON object but found {}",
                json_type_name(&other)
            )))),
        }
    }

    /// Diagnostic message for a status the caller treats as failure.
    pub fn status_message(&self, endpoint: &Endpoint) -> String {
        let mut message = format!(
            "Spark Job Server {} response {}",
            endpoint.as_str(),
            self.status
        );
        if !self.body.is_empty() {
            message.push(' ');
            message.push_str(&self.body);
        }
        sanitize_error_message(&message)
    }

    /// Log the unexpected status and turn it into an error.
    pub fn status_error(&self, endpoint: &Endpoint) -> Error {
        let message = self.status_message(endpoint);
        error!(status = self.status, "{message}");
        Error::new(ErrorKind::Http {
            status: self.status,
            message,
        })
    }

    /// Log the unexpected status without failing.
    pub fn log_status(&self, endpoint: &Endpoint) {
        let message = self.status_message(endpoint);
        error!(status = self.status, "{message}");
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

static USERINFO_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"://[^/@\s]+@").ok());

/// Sanitize an error message before it is logged or returned.
///
/// This function:
/// - Redacts user-info (`user:password@`) embedded in URLs
/// - Truncates messages longer than 500 characters
fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let mut sanitized = match &*USERINFO_PATTERN {
        Some(pattern) => pattern.replace_all(message, "://[REDACTED]@").to_string(),
        None => message.to_string(),
    };

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
