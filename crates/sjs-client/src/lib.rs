//! # sjs-client
//!
//! Core HTTP client infrastructure for the Spark Job Server REST API.
//!
//! This crate provides the foundational HTTP client with:
//! - Host failover on connectivity failures, driven by a pluggable policy
//! - Per-call retry state (no shared counters between concurrent calls)
//! - Basic authentication
//! - Fully drained responses with status diagnostics
//! - Request/response tracing
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (sjs-api: jars, contexts, jobs, job results)               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  JobServerHttpClient                        │
//! │  - Holds endpoint, credentials, failover policy             │
//! │  - run_with_failover: bounded retry loop across hosts       │
//! │  - execute: one request, drained into a Response            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use sjs_client::{FailoverDecision, JobServerHttpClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sjs_client::Error> {
//!     let client = JobServerHttpClient::new("http://primary:8090", ClientConfig::default())?
//!         .with_failover(|_retry: u32| FailoverDecision::new(2, "http://standby:8090"));
//!
//!     let response = client
//!         .run_with_failover("get information of jars", |endpoint| {
//!             let client = &client;
//!             async move { client.execute(client.get(endpoint.join("jars"))).await }
//!         })
//!         .await?;
//!
//!     println!("{}", response.body());
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod credentials;
mod endpoint;
mod error;
mod failover;
mod request;
mod response;
pub mod security;

pub use client::JobServerHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder, EndpointScope};
pub use credentials::Credentials;
pub use endpoint::Endpoint;
pub use error::{Error, ErrorKind, Result};
pub use failover::{
    BackoffStrategy, FailoverBackoff, FailoverDecision, FailoverPolicy, HostRotation, RetryState,
};
pub use request::{RequestBody, RequestBuilder, RequestMethod, JAR_CONTENT_TYPE, TEXT_CONTENT_TYPE};
pub use response::Response;

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("spark-jobserver-client/", env!("CARGO_PKG_VERSION"));
