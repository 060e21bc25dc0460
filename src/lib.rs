//! # spark-jobserver-client
//!
//! A client library for the Spark Job Server REST API.
//!
//! Upload application jars, manage long-lived contexts, start jobs and
//! poll their results. Every call fails over to alternate hosts when the
//! current one cannot be reached, following a pluggable policy.
//!
//! ## Security
//!
//! - Passwords are redacted in Debug output
//! - Tracing skips credentials and request payloads
//! - Error messages redact credentials embedded in URLs
//!
//! ## Crates
//!
//! - **sjs-client** - HTTP infrastructure: transport, drained responses, failover loop
//! - **sjs-api** - Job server operations, job parameters, result parsing
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spark_jobserver_client::{HostRotation, JobServerClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JobServerClient::new("http://primary:8090")?
//!         .with_failover(HostRotation::new(3, ["http://standby-1:8090", "http://standby-2:8090"])?);
//!
//!     for context in client.list_contexts().await? {
//!         println!("{context}");
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
pub use sjs_api as api;
pub use sjs_client as client;

// Re-export commonly used types at the top level
pub use sjs_api::{
    ClientConfig, Credentials, EndpointScope, Error, ErrorKind, FailoverBackoff, FailoverDecision,
    FailoverPolicy, HostRotation, JarInfo, JobConfig, JobError, JobInfo, JobOutcome, JobParams,
    JobResult, JobServerClient, Result,
};
