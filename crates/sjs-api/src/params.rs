//! Job and context parameters.

use sjs_client::security::url;

/// Name of the uploaded application (jar) to run a job from.
pub const PARAM_APP_NAME: &str = "appName";
/// Fully qualified class of the job.
pub const PARAM_CLASS_PATH: &str = "classPath";
/// Context to run the job in.
pub const PARAM_CONTEXT: &str = "context";
/// Wait for the job result instead of starting asynchronously.
pub const PARAM_SYNC: &str = "sync";
/// Seconds to wait for a synchronous job.
pub const PARAM_TIMEOUT: &str = "timeout";
/// Number of cores allocated to a context.
pub const PARAM_NUM_CPU_CORES: &str = "num-cpu-cores";
/// Memory per node allocated to a context (e.g. `512m`).
pub const PARAM_MEM_PER_NODE: &str = "memory-per-node";

/// Insertion-ordered query parameters.
///
/// Behaves like a map: inserting an existing key replaces its value in
/// place, so the rendered query keeps the order keys were first added.
///
/// ```rust
/// use sjs_api::{JobParams, PARAM_APP_NAME, PARAM_CLASS_PATH};
///
/// let params = JobParams::new()
///     .with(PARAM_APP_NAME, "wordcount")
///     .with(PARAM_CLASS_PATH, "spark.jobserver.WordCountExample");
/// assert_eq!(
///     params.to_query_string(),
///     "appName=wordcount&classPath=spark.jobserver.WordCountExample"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobParams {
    entries: Vec<(String, String)>,
}

impl JobParams {
    /// Empty parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a parameter, returning the previous value of the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// The value of a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the parameter is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Remove a parameter.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as `k1=v1&k2=v2...` with encoded keys and values.
    pub fn to_query_string(&self) -> String {
        url::query_string(self.iter())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for JobParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for JobParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
