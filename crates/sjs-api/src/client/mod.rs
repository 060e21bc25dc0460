//! Spark Job Server API client.
//!
//! This client wraps `JobServerHttpClient` from `sjs-client` and provides
//! typed methods for the jar, context and job endpoints. Every operation
//! runs inside the transport's failover loop, so a connectivity failure
//! re-runs the whole operation against the next host.

use sjs_client::{ClientConfig, Credentials, Endpoint, Error, ErrorKind, FailoverPolicy, JobServerHttpClient};

use crate::error::Result;

mod contexts;
mod jars;
mod jobs;

/// Spark Job Server API client.
///
/// Provides typed methods for:
/// - Uploading and listing application jars
/// - Creating, listing and deleting contexts
/// - Starting jobs and fetching their results and configuration
///
/// # Example
///
/// ```rust,ignore
/// use sjs_api::{FailoverDecision, JobParams, JobServerClient, PARAM_APP_NAME, PARAM_CLASS_PATH};
///
/// let client = JobServerClient::new("http://jobserver:8090")?
///     .with_credentials("admin", "secret")
///     .with_failover(|_retry: u32| FailoverDecision::new(2, "http://standby:8090"));
///
/// client.upload_jar_file("target/wordcount.jar", "wordcount").await?;
///
/// let params = JobParams::new()
///     .with(PARAM_APP_NAME, "wordcount")
///     .with(PARAM_CLASS_PATH, "spark.jobserver.WordCountExample");
/// let started = client.start_job(Some("input.string = a b c a"), &params).await?;
///
/// let result = client.get_job_result(started.job_id().unwrap_or_default()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct JobServerClient {
    http: JobServerHttpClient,
}

impl JobServerClient {
    /// Create a new client for the job server at `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            http: JobServerHttpClient::default_client(base_url)?,
        })
    }

    /// Create a new client with custom HTTP configuration.
    pub fn with_config(base_url: impl AsRef<str>, config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: JobServerHttpClient::new(base_url, config)?,
        })
    }

    /// Create a client from an existing JobServerHttpClient.
    pub fn from_client(http: JobServerHttpClient) -> Self {
        Self { http }
    }

    /// Create a client from environment variables.
    ///
    /// Reads `SPARK_JOBSERVER_URL` (required) and, when both are set,
    /// `SPARK_JOBSERVER_USERNAME` and `SPARK_JOBSERVER_PASSWORD`.
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("SPARK_JOBSERVER_URL").map_err(|_| {
            Error::new(ErrorKind::Config(
                "SPARK_JOBSERVER_URL environment variable not set".to_string(),
            ))
        })?;

        let mut http = JobServerHttpClient::default_client(url)?;
        http.set_credentials(Credentials::from_env());
        Ok(Self { http })
    }

    /// Authenticate every request with HTTP basic auth.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.http = self.http.with_credentials(Credentials::new(username, password));
        self
    }

    /// Fail over to other hosts on connectivity failures.
    pub fn with_failover(mut self, policy: impl FailoverPolicy + 'static) -> Self {
        self.http = self.http.with_failover(policy);
        self
    }

    /// Get the underlying JobServerHttpClient.
    pub fn inner(&self) -> &JobServerHttpClient {
        &self.http
    }

    /// The endpoint the next call will start from.
    pub fn endpoint(&self) -> Endpoint {
        self.http.endpoint()
    }
}

/// Reject blank names and ids before any request is sent.
fn require_non_empty(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_input(format!(
            "The given {what} is null or empty."
        )));
    }
    Ok(())
}
