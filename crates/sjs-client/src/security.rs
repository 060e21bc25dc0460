//! Security utilities for job server requests.
//!
//! ## URL Encoding
//!
//! Caller-provided names and ids end up in URL paths and query strings and
//! MUST be encoded:
//!
//! ```rust
//! use sjs_client::security::url;
//!
//! // CORRECT
//! let path = format!("jobs/{}", url::encode_param("job/../../jars"));
//! assert_eq!(path, "jobs/job%2F..%2F..%2Fjars");
//!
//! // WRONG - NEVER do this with caller input
//! // let path = format!("jobs/{}", job_id);
//! ```

/// URL encoding utilities.
pub mod url {
    /// URL-encode a path segment or query parameter.
    ///
    /// Unreserved characters (`A-Z a-z 0-9 - . _ ~`) pass through unchanged,
    /// so typical parameter names like `num-cpu-cores` are not altered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sjs_client::security::url;
    ///
    /// assert_eq!(url::encode_param("memory-per-node"), "memory-per-node");
    /// assert_eq!(url::encode_param("a b&c"), "a%20b%26c");
    /// ```
    #[must_use]
    pub fn encode_param(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }

    /// Render `key=value` pairs as a query string, in iteration order.
    ///
    /// Returns an empty string for no pairs, otherwise the pairs joined by
    /// `&` without a leading `?`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sjs_client::security::url;
    ///
    /// let query = url::query_string([("appName", "wc"), ("classPath", "spark.jobserver.WordCount")]);
    /// assert_eq!(query, "appName=wc&classPath=spark.jobserver.WordCount");
    /// ```
    #[must_use]
    pub fn query_string<I, K, V>(pairs: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| format!("{}={}", encode_param(k.as_ref()), encode_param(v.as_ref())))
            .collect::<Vec<_>>()
            .join("&")
    }
}
