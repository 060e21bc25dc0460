//! Job submission and job result parsing.
//!
//! The server answers job calls with one of several shapes:
//!
//! ```text
//! {"status": "OK", "result": ...}                              completed
//! {"result": ...}                                              completed
//! {"status": "STARTED", "result": {"context": .., "jobId": ..}} started
//! {"status": "ERROR", "result": {"message": .., ...}}          failed
//! {"status": "RUNNING", "jobId": .., ...}                      anything else
//! ```
//!
//! The first matching shape wins, in that order.

use serde_json::{Map, Value};

use crate::types::JobError;
use sjs_client::{Error, ErrorKind, Result};

/// Status of a job that finished with a result.
pub const STATUS_OK: &str = "OK";
/// Status of a finished job.
pub const STATUS_FINISHED: &str = "FINISHED";
/// Status of an asynchronously started job.
pub const STATUS_STARTED: &str = "STARTED";
/// Status of a failed job.
pub const STATUS_ERROR: &str = "ERROR";
/// Status of a running job.
pub const STATUS_RUNNING: &str = "RUNNING";

const KEY_STATUS: &str = "status";
const KEY_RESULT: &str = "result";
const KEY_CONTEXT: &str = "context";
const KEY_JOB_ID: &str = "jobId";

fn is_completed_status(status: &str) -> bool {
    status == STATUS_OK || status == STATUS_FINISHED
}

/// What a job result response says about the job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// The job finished; the payload is the `result` value as text.
    Completed(String),
    /// The job was started asynchronously.
    Started,
    /// The job failed.
    Failed(JobError),
    /// Any other shape; every member except `status`.
    Extended(Map<String, Value>),
    /// The server does not know the job.
    NotFound,
}

/// A parsed job result.
#[derive(Debug, Clone, PartialEq)]
pub struct JobResult {
    raw: String,
    status: Option<String>,
    context: Option<String>,
    job_id: Option<String>,
    outcome: JobOutcome,
}

impl JobResult {
    /// Parse a job result response body.
    ///
    /// Bodies that are not JSON objects are rejected.
    pub fn parse(body: impl Into<String>) -> Result<Self> {
        let raw = body.into();
        let object = match serde_json::from_str::<Value>(&raw)? {
            Value::Object(object) => object,
            _ => {
                return Err(Error::new(ErrorKind::Json(
                    "job result is not a JSON object".to_string(),
                )))
            }
        };

        let status = object
            .get(KEY_STATUS)
            .map(|value| text_of(value.clone()));
        let completed = status.as_deref().is_none_or(is_completed_status);

        let mut result = Self {
            raw,
            status,
            context: None,
            job_id: None,
            outcome: JobOutcome::NotFound,
        };

        if completed && object.contains_key(KEY_RESULT) {
            let payload = object.get(KEY_RESULT).cloned().map(text_of);
            result.outcome = JobOutcome::Completed(payload.unwrap_or_default());
        } else if result.status.as_deref() == Some(STATUS_STARTED) && object.contains_key(KEY_RESULT)
        {
            let started = match object.get(KEY_RESULT) {
                Some(Value::Object(started)) => started,
                _ => {
                    return Err(Error::new(ErrorKind::Json(
                        "started job result is not a JSON object".to_string(),
                    )))
                }
            };
            result.context = Some(required_text(started, KEY_CONTEXT)?);
            result.job_id = Some(required_text(started, KEY_JOB_ID)?);
            result.outcome = JobOutcome::Started;
        } else if result.status.as_deref() == Some(STATUS_ERROR) {
            let details = object
                .get(STATUS_ERROR)
                .or_else(|| object.get(KEY_RESULT))
                .cloned();
            result.outcome = JobOutcome::Failed(error_details(details)?);
        } else {
            let extended = object
                .into_iter()
                .filter(|(key, _)| key != KEY_STATUS)
                .collect();
            result.outcome = JobOutcome::Extended(extended);
        }

        Ok(result)
    }

    /// A result for a job the server does not know.
    pub fn not_found(body: impl Into<String>, job_id: impl Into<String>) -> Self {
        Self {
            raw: body.into(),
            status: None,
            context: None,
            job_id: Some(job_id.into()),
            outcome: JobOutcome::NotFound,
        }
    }

    /// Record the job id the result was requested for.
    pub(crate) fn set_job_id(&mut self, job_id: &str) {
        self.job_id = Some(job_id.to_string());
    }

    /// The raw response body.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The reported job status.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Context of an asynchronously started job.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// The job id.
    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    /// The parsed outcome.
    pub fn outcome(&self) -> &JobOutcome {
        &self.outcome
    }

    /// The result payload of a completed job.
    pub fn payload(&self) -> Option<&str> {
        match &self.outcome {
            JobOutcome::Completed(payload) => Some(payload),
            _ => None,
        }
    }

    /// Error details of a failed job.
    pub fn error(&self) -> Option<&JobError> {
        match &self.outcome {
            JobOutcome::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Members of a response with no recognized shape.
    pub fn extended_attributes(&self) -> Option<&Map<String, Value>> {
        match &self.outcome {
            JobOutcome::Extended(attributes) => Some(attributes),
            _ => None,
        }
    }

    /// Returns true if the job finished with a result payload.
    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, JobOutcome::Completed(_))
    }

    /// Returns true if the job was started asynchronously.
    pub fn is_started(&self) -> bool {
        matches!(self.outcome, JobOutcome::Started)
    }

    /// Returns true if the job failed.
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, JobOutcome::Failed(_))
    }

    /// Returns true if the server does not know the job.
    pub fn is_not_found(&self) -> bool {
        matches!(self.outcome, JobOutcome::NotFound)
    }
}

/// Strings verbatim, other values serialized.
fn text_of(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn required_text(object: &Map<String, Value>, key: &str) -> Result<String> {
    object
        .get(key)
        .cloned()
        .map(text_of)
        .ok_or_else(|| Error::new(ErrorKind::Json(format!("missing field `{key}`"))))
}

fn error_details(details: Option<Value>) -> Result<JobError> {
    match details {
        Some(value @ Value::Object(_)) => Ok(serde_json::from_value(value)?),
        Some(Value::String(message)) => Ok(JobError {
            message: Some(message),
            ..JobError::default()
        }),
        _ => Ok(JobError::default()),
    }
}
