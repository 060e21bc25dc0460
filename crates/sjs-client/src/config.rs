//! Client configuration.

use crate::failover::FailoverBackoff;
use std::time::Duration;

/// Where a failover switch of the endpoint is recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EndpointScope {
    /// Failover replaces the endpoint of the client itself, so every later
    /// call (on any task or thread) starts from the new host.
    #[default]
    Shared,
    /// Failover only affects the remainder of the call that failed; the
    /// client's configured endpoint never changes.
    PerCall,
}

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Pool idle timeout.
    pub pool_idle_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_max_idle_per_host: usize,
    /// User-Agent header value.
    pub user_agent: String,
    /// Whether to enable request/response tracing.
    pub enable_tracing: bool,
    /// Accept gzip/deflate compressed responses.
    pub accept_compressed: bool,
    /// Scope of endpoint changes made by failover.
    pub endpoint_scope: EndpointScope,
    /// Delay between failover attempts. `None` retries immediately.
    pub failover_backoff: Option<FailoverBackoff>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 10,
            user_agent: crate::USER_AGENT.to_string(),
            enable_tracing: true,
            accept_compressed: true,
            endpoint_scope: EndpointScope::Shared,
            failover_backoff: None,
        }
    }
}

impl ClientConfig {
    /// Create a new client config builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for ClientConfig.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set pool idle timeout.
    pub fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    pub fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = max;
        self
    }

    /// Set custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Enable or disable request/response tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    /// Accept compressed responses.
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.config.accept_compressed = enabled;
        self
    }

    /// Set the scope of failover endpoint changes.
    pub fn with_endpoint_scope(mut self, scope: EndpointScope) -> Self {
        self.config.endpoint_scope = scope;
        self
    }

    /// Wait between failover attempts.
    pub fn with_failover_backoff(mut self, backoff: FailoverBackoff) -> Self {
        self.config.failover_backoff = Some(backoff);
        self
    }

    /// Fail over immediately (the default).
    pub fn without_failover_backoff(mut self) -> Self {
        self.config.failover_backoff = None;
        self
    }

    /// Build the client configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
