//! Core HTTP client with basic auth, tracing and host failover.

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, error, info, instrument, warn};

use crate::config::{ClientConfig, EndpointScope};
use crate::credentials::Credentials;
use crate::endpoint::Endpoint;
use crate::error::{Error, ErrorKind, Result};
use crate::failover::{FailoverPolicy, RetryState};
use crate::request::{RequestBody, RequestBuilder, RequestMethod};
use crate::response::Response;

/// HTTP client for a Spark Job Server with basic auth and host failover.
///
/// Clones share the endpoint, so with [`EndpointScope::Shared`] a failover
/// performed through one clone is seen by all of them.
#[derive(Clone)]
pub struct JobServerHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
    endpoint: Arc<RwLock<Endpoint>>,
    credentials: Option<Credentials>,
    failover: Option<Arc<dyn FailoverPolicy>>,
}

impl std::fmt::Debug for JobServerHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobServerHttpClient")
            .field("endpoint", &self.endpoint())
            .field("credentials", &self.credentials)
            .field("failover", &self.failover.as_ref().map(|_| "FailoverPolicy"))
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl JobServerHttpClient {
    /// Create a new HTTP client for the job server at `base_url`.
    pub fn new(base_url: impl AsRef<str>, config: ClientConfig) -> Result<Self> {
        let endpoint = Endpoint::parse(base_url)?;

        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self {
            inner,
            config,
            endpoint: Arc::new(RwLock::new(endpoint)),
            credentials: None,
            failover: None,
        })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client(base_url: impl AsRef<str>) -> Result<Self> {
        Self::new(base_url, ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The endpoint the next call will start from.
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the endpoint used by subsequent calls.
    pub fn set_endpoint(&self, endpoint: Endpoint) {
        *self
            .endpoint
            .write()
            .unwrap_or_else(PoisonError::into_inner) = endpoint;
    }

    /// Attach basic-auth credentials to every request.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set or clear the credentials.
    pub fn set_credentials(&mut self, credentials: Option<Credentials>) {
        self.credentials = credentials;
    }

    /// The configured credentials, if any.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Fail over to other hosts on connectivity failures.
    pub fn with_failover(mut self, policy: impl FailoverPolicy + 'static) -> Self {
        self.failover = Some(Arc::new(policy));
        self
    }

    /// Set or clear the failover policy.
    pub fn set_failover(&mut self, policy: Option<Arc<dyn FailoverPolicy>>) {
        self.failover = policy;
    }

    /// Returns true if a failover policy is configured.
    pub fn has_failover(&self) -> bool {
        self.failover.is_some()
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Get, url)
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Post, url)
    }

    /// Create a DELETE request builder.
    pub fn delete(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Delete, url)
    }

    /// Execute a single request and drain its response.
    ///
    /// Non-success statuses are returned as responses, not errors; the
    /// caller decides what a status means for its operation. Transport
    /// failures are errors, with connection failures mapped to
    /// [`ErrorKind::Connection`].
    #[instrument(skip(self, request), fields(method = ?request.method, url = %request.url))]
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let RequestBuilder {
            method,
            url,
            headers,
            body,
        } = request;

        let mut req = self.inner.request(method.to_reqwest(), &url);

        if let Some(creds) = self.credentials.as_ref().filter(|c| c.is_complete()) {
            req = req.basic_auth(creds.username(), Some(creds.password()));
        }

        for (name, value) in &headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(body) = body {
            req = match body {
                RequestBody::Text(text) => req.body(text),
                RequestBody::Bytes(bytes) => req.body(bytes),
            };
        }

        if self.config.enable_tracing {
            debug!(method = ?method, url = %url, "Sending request");
        }

        let response = Response::drain(req.send().await?).await;

        if self.config.enable_tracing {
            let status = response.status();
            let content_length = response.body().len();
            if (200..300).contains(&status) {
                debug!(status, content_length, "Response received");
            } else {
                info!(status, content_length, "Non-success response");
            }
        }

        Ok(response)
    }

    /// Run one logical operation, failing over to other hosts on
    /// connectivity failures.
    ///
    /// `attempt` is invoked with the endpoint to use and must perform the
    /// whole operation (validation, request, interpretation). It is invoked
    /// again from the top after every failover. Errors other than
    /// connectivity failures are returned immediately.
    ///
    /// `operation` names the call in logs and in the exhaustion error.
    pub async fn run_with_failover<T, F, Fut>(
        &self,
        operation: &'static str,
        mut attempt: F,
    ) -> Result<T>
    where
        F: FnMut(Endpoint) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut retry = RetryState::new();
        let mut endpoint = self.endpoint();

        loop {
            let err = match attempt(endpoint.clone()).await {
                Err(err) if err.is_connectivity() => err,
                other => return other,
            };

            let Some(policy) = self.failover.as_ref() else {
                error!(operation, error = %err, "Connectivity failure and no failover policy configured");
                return Err(Error::with_source(ErrorKind::NoFailover(err.to_string()), err));
            };

            let count = retry.record_failure();
            let decision = policy.fallback(count);

            if !decision.permits(count) {
                error!(
                    operation,
                    attempts = count,
                    max_retries = decision.max_retries,
                    error = %err,
                    "Failover retries exhausted"
                );
                return Err(Error::with_source(
                    ErrorKind::RetriesExhausted {
                        operation,
                        attempts: count,
                    },
                    err,
                ));
            }

            let next = Endpoint::parse(&decision.next_host)?;
            warn!(
                operation,
                attempt = count,
                max_retries = decision.max_retries,
                from = %endpoint,
                to = %next,
                error = %err,
                "Connectivity failure, failing over to next host"
            );

            if self.config.endpoint_scope == EndpointScope::Shared {
                self.set_endpoint(next.clone());
            }
            endpoint = next;

            if let Some(backoff) = self.config.failover_backoff {
                tokio::time::sleep(backoff.delay_for(count)).await;
            }
        }
    }
}
