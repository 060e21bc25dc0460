//! # sjs-api
//!
//! Spark Job Server API client.
//!
//! ## Features
//!
//! - **Jars** - Upload application jars from memory, readers or files
//! - **Contexts** - Create, list and delete long-lived job contexts
//! - **Jobs** - Start jobs, poll their results, kill them, read their config
//! - **Failover** - Every operation re-runs against the next host when the
//!   current one cannot be reached
//!
//! ## Example
//!
//! ```rust,ignore
//! use sjs_api::{JobParams, JobServerClient, PARAM_APP_NAME, PARAM_CLASS_PATH};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sjs_api::Error> {
//!     let client = JobServerClient::new("http://localhost:8090")?;
//!
//!     for jar in client.list_jars().await? {
//!         println!("{} uploaded at {}", jar.jar_name, jar.uploaded_time);
//!     }
//!
//!     let params = JobParams::new()
//!         .with(PARAM_APP_NAME, "wordcount")
//!         .with(PARAM_CLASS_PATH, "spark.jobserver.WordCountExample");
//!     let result = client.start_job(Some("input.string = a b c a"), &params).await?;
//!
//!     if let Some(job_id) = result.job_id() {
//!         let status = client.get_job_result(job_id).await?;
//!         println!("{:?}", status.outcome());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod params;
mod result;
mod types;

pub use client::JobServerClient;
pub use error::{Error, ErrorKind, Result};
pub use params::{
    JobParams, PARAM_APP_NAME, PARAM_CLASS_PATH, PARAM_CONTEXT, PARAM_MEM_PER_NODE,
    PARAM_NUM_CPU_CORES, PARAM_SYNC, PARAM_TIMEOUT,
};
pub use result::{
    JobOutcome, JobResult, STATUS_ERROR, STATUS_FINISHED, STATUS_OK, STATUS_RUNNING,
    STATUS_STARTED,
};
pub use types::{JarInfo, JobConfig, JobError, JobInfo};

// Transport configuration and failover types callers need to build a client.
pub use sjs_client::{
    ClientConfig, Credentials, EndpointScope, FailoverBackoff, FailoverDecision, FailoverPolicy,
    HostRotation,
};
