//! HTTP request building.

use bytes::Bytes;

/// Content type of jar uploads.
pub const JAR_CONTENT_TYPE: &str = "application/java-archive";

/// Content type of job input payloads.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Delete,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Builder for a single job server request.
#[derive(Debug)]
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Option<RequestBody>,
}

/// Request body content.
#[derive(Debug)]
pub enum RequestBody {
    Text(String),
    Bytes(Bytes),
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// The request method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// The full request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Add a header, replacing an existing one with the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Set a UTF-8 text body.
    pub fn text(self, body: impl Into<String>) -> Self {
        let mut this = self.header("Content-Type", TEXT_CONTENT_TYPE);
        this.body = Some(RequestBody::Text(body.into()));
        this
    }

    /// Set a jar archive body.
    pub fn jar(self, body: impl Into<Bytes>) -> Self {
        let mut this = self.header("Content-Type", JAR_CONTENT_TYPE);
        this.body = Some(RequestBody::Bytes(body.into()));
        this
    }
}
