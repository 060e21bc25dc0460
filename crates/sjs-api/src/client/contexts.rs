//! Context operations.

use tracing::instrument;

use sjs_client::security::url;

use super::require_non_empty;
use crate::error::Result;
use crate::params::JobParams;

impl super::JobServerClient {
    /// List the names of the running contexts.
    #[instrument(skip(self))]
    pub async fn list_contexts(&self) -> Result<Vec<String>> {
        self.http
            .run_with_failover("get information of contexts", |endpoint| async move {
                let response = self
                    .http
                    .execute(self.http.get(endpoint.join("contexts")))
                    .await?;
                if !response.is_ok() {
                    return Err(response.status_error(&endpoint));
                }
                response.json()
            })
            .await
    }

    /// Create a context named `name`.
    ///
    /// `params` (e.g. `num-cpu-cores`, `memory-per-node`) become the query
    /// string. Returns `false` when the server does not answer 200.
    #[instrument(skip(self, params))]
    pub async fn create_context(&self, name: &str, params: &JobParams) -> Result<bool> {
        self.http
            .run_with_failover("create a context", |endpoint| async move {
                require_non_empty(name, "contextName")?;
                let mut url = endpoint.join(&format!("contexts/{}", url::encode_param(name)));
                if !params.is_empty() {
                    url.push('?');
                    url.push_str(&params.to_query_string());
                }

                let response = self.http.execute(self.http.post(url)).await?;
                if !response.is_ok() {
                    response.log_status(&endpoint);
                    return Ok(false);
                }
                Ok(true)
            })
            .await
    }

    /// Delete the context named `name`, stopping its jobs.
    ///
    /// Returns `false` when the server does not answer 200.
    #[instrument(skip(self))]
    pub async fn delete_context(&self, name: &str) -> Result<bool> {
        self.http
            .run_with_failover("delete the target context", |endpoint| async move {
                require_non_empty(name, "contextName")?;
                let url = endpoint.join(&format!("contexts/{}", url::encode_param(name)));

                let response = self.http.execute(self.http.delete(url)).await?;
                if !response.is_ok() {
                    response.log_status(&endpoint);
                    return Ok(false);
                }
                Ok(true)
            })
            .await
    }
}
