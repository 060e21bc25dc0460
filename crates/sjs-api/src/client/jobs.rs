//! Job operations.

use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, error, instrument};

use sjs_client::security::url;
use sjs_client::Error;

use super::require_non_empty;
use crate::error::Result;
use crate::params::{JobParams, PARAM_APP_NAME, PARAM_CLASS_PATH};
use crate::result::JobResult;
use crate::types::{JobConfig, JobInfo};

impl super::JobServerClient {
    /// List the jobs known to the server.
    #[instrument(skip(self))]
    pub async fn list_jobs(&self) -> Result<Vec<JobInfo>> {
        self.http
            .run_with_failover("get information of jobs", |endpoint| async move {
                let response = self.http.execute(self.http.get(endpoint.join("jobs"))).await?;
                if !response.is_ok() {
                    return Err(response.status_error(&endpoint));
                }
                response.json()
            })
            .await
    }

    /// Start a job.
    ///
    /// `params` must name the application (`appName`) and the job class
    /// (`classPath`); they are sent as the query string in insertion order.
    /// `data` is posted as the job's plain-text input.
    ///
    /// The server answers with a completed result for synchronous jobs and
    /// a started result (context and job id) otherwise.
    #[instrument(skip(self, data, params))]
    pub async fn start_job(&self, data: Option<&str>, params: &JobParams) -> Result<JobResult> {
        self.http
            .run_with_failover("start a new job", |endpoint| async move {
                validate_job_params(params)?;
                let url = format!("{}?{}", endpoint.join("jobs"), params.to_query_string());

                let mut request = self.http.post(url);
                if let Some(data) = data {
                    request = request.text(data);
                }

                let response = self.http.execute(request).await?;
                if !(response.is_ok() || response.is_accepted()) {
                    return Err(response.status_error(&endpoint));
                }
                JobResult::parse(response.into_body())
            })
            .await
    }

    /// Start a job with the text read from `reader` as input.
    ///
    /// Lines are normalized to `\n` endings. A read failure is an error.
    #[instrument(skip(self, reader, params))]
    pub async fn start_job_reader<R>(&self, mut reader: R, params: &JobParams) -> Result<JobResult>
    where
        R: AsyncRead + Unpin,
    {
        let mut input = String::new();
        reader.read_to_string(&mut input).await.map_err(|err| {
            error!(error = %err, "Error occurs when reading job input");
            Error::from(err)
        })?;
        let data = join_lines(&input);
        debug!(bytes = data.len(), "Read job input");
        self.start_job(Some(data.as_str()), params).await
    }

    /// Start a job with the contents of a local file as input.
    #[instrument(skip(self, path, params))]
    pub async fn start_job_file(
        &self,
        path: impl AsRef<Path>,
        params: &JobParams,
    ) -> Result<JobResult> {
        let file = tokio::fs::File::open(path.as_ref()).await.map_err(|err| {
            error!(error = %err, path = %path.as_ref().display(), "Error occurs when reading file");
            Error::from(err)
        })?;
        self.start_job_reader(file, params).await
    }

    /// Get the status or result of a job.
    ///
    /// An unknown job is not an error: it yields a result for which
    /// [`JobResult::is_not_found`] is true, carrying the server's message.
    #[instrument(skip(self))]
    pub async fn get_job_result(&self, job_id: &str) -> Result<JobResult> {
        self.http
            .run_with_failover("get information of the target job", |endpoint| async move {
                require_non_empty(job_id, "jobId")?;
                let url = endpoint.join(&format!("jobs/{}", url::encode_param(job_id)));

                let response = self.http.execute(self.http.get(url)).await?;
                if response.is_not_found() {
                    return Ok(JobResult::not_found(response.into_body(), job_id));
                }
                if !response.is_ok() {
                    return Err(response.status_error(&endpoint));
                }
                let mut result = JobResult::parse(response.into_body())?;
                result.set_job_id(job_id);
                Ok(result)
            })
            .await
    }

    /// Kill a job.
    ///
    /// Returns `false` when the server does not answer 200.
    #[instrument(skip(self))]
    pub async fn delete_job(&self, job_id: &str) -> Result<bool> {
        self.http
            .run_with_failover("delete the target job", |endpoint| async move {
                require_non_empty(job_id, "jobId")?;
                let url = endpoint.join(&format!("jobs/{}", url::encode_param(job_id)));

                let response = self.http.execute(self.http.delete(url)).await?;
                if !response.is_ok() {
                    response.log_status(&endpoint);
                    return Ok(false);
                }
                Ok(true)
            })
            .await
    }

    /// Get the configuration a job was started with.
    #[instrument(skip(self))]
    pub async fn get_config(&self, job_id: &str) -> Result<JobConfig> {
        self.http
            .run_with_failover("get information of the target job config", |endpoint| async move {
                require_non_empty(job_id, "jobId")?;
                let url = endpoint.join(&format!("jobs/{}/config", url::encode_param(job_id)));

                let response = self.http.execute(self.http.get(url)).await?;
                if !response.is_ok() {
                    return Err(response.status_error(&endpoint));
                }
                Ok(JobConfig::from(response.json_object()?))
            })
            .await
    }
}

fn validate_job_params(params: &JobParams) -> Result<()> {
    if params.is_empty() {
        return Err(Error::invalid_input("The given params is null or empty."));
    }
    if !params.contains_key(PARAM_APP_NAME) || !params.contains_key(PARAM_CLASS_PATH) {
        return Err(Error::invalid_input(
            "The given params should contains appName and classPath",
        ));
    }
    Ok(())
}

fn join_lines(input: &str) -> String {
    input.lines().collect::<Vec<_>>().join("\n")
}
