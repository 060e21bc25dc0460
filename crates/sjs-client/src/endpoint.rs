//! Normalized job server base URLs.

use std::fmt;

use crate::error::{Error, ErrorKind, Result};

/// Base URL of a job server, always terminated by a single `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint(String);

impl Endpoint {
    /// Parse and normalize a base URL.
    ///
    /// Only `http` and `https` URLs are accepted. A missing trailing slash is
    /// appended.
    pub fn parse(url: impl AsRef<str>) -> Result<Self> {
        let raw = url.as_ref().trim();
        let parsed = url::Url::parse(raw)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::new(ErrorKind::InvalidUrl(format!(
                "unsupported scheme '{}' in job server URL",
                parsed.scheme()
            ))));
        }
        if parsed.host_str().is_none() {
            return Err(Error::new(ErrorKind::InvalidUrl(
                "job server URL has no host".to_string(),
            )));
        }

        let mut normalized = raw.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        Ok(Self(normalized))
    }

    /// The normalized URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append a relative path to the base URL.
    ///
    /// ```rust
    /// use sjs_client::Endpoint;
    ///
    /// let endpoint = Endpoint::parse("http://localhost:8090").unwrap();
    /// assert_eq!(endpoint.join("jobs/abc/config"), "http://localhost:8090/jobs/abc/config");
    /// ```
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.0, path.trim_start_matches('/'))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
