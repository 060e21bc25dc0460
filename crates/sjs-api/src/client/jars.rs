//! Application jar operations.

use std::path::Path;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{error, instrument};

use sjs_client::security::url;
use sjs_client::Error;

use super::require_non_empty;
use crate::error::Result;
use crate::types::{jars_from_object, JarInfo};

impl super::JobServerClient {
    /// List the uploaded jars.
    ///
    /// Any status other than 200 is an error.
    #[instrument(skip(self))]
    pub async fn list_jars(&self) -> Result<Vec<JarInfo>> {
        self.http
            .run_with_failover("get information of jars", |endpoint| async move {
                let response = self.http.execute(self.http.get(endpoint.join("jars"))).await?;
                if !response.is_ok() {
                    return Err(response.status_error(&endpoint));
                }
                Ok(jars_from_object(response.json_object()?))
            })
            .await
    }

    /// Upload a jar under `app_name`.
    ///
    /// Returns `false` rather than an error when the server rejects the
    /// upload or the request fails for any reason other than connectivity.
    #[instrument(skip(self, jar))]
    pub async fn upload_jar(&self, jar: impl Into<Bytes>, app_name: &str) -> Result<bool> {
        require_non_empty(app_name, "appName")?;
        let jar: Bytes = jar.into();

        self.http
            .run_with_failover("uploading spark job jars", |endpoint| {
                let body = jar.clone();
                async move {
                    let url = endpoint.join(&format!("jars/{}", url::encode_param(app_name)));
                    match self.http.execute(self.http.post(url).jar(body)).await {
                        Ok(response) if response.is_ok() => Ok(true),
                        Ok(response) => {
                            response.log_status(&endpoint);
                            Ok(false)
                        }
                        Err(err) if err.is_connectivity() => Err(err),
                        Err(err) => {
                            error!(error = %err, "Error occurs when uploading spark job jars");
                            Ok(false)
                        }
                    }
                }
            })
            .await
    }

    /// Upload a jar read fully from `reader`.
    ///
    /// A read failure is logged and reported as `false`.
    #[instrument(skip(self, reader))]
    pub async fn upload_jar_reader<R>(&self, mut reader: R, app_name: &str) -> Result<bool>
    where
        R: AsyncRead + Unpin,
    {
        require_non_empty(app_name, "appName")?;
        let mut jar = Vec::new();
        if let Err(err) = reader.read_to_end(&mut jar).await {
            error!(error = %err, "Error occurs when reading the spark job jar");
            return Ok(false);
        }
        self.upload_jar(jar, app_name).await
    }

    /// Upload a local `.jar` file.
    ///
    /// Failing to read the file is an error.
    #[instrument(skip(self, path))]
    pub async fn upload_jar_file(&self, path: impl AsRef<Path>, app_name: &str) -> Result<bool> {
        let path = path.as_ref();
        let is_jar = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(".jar"));
        if !is_jar {
            return Err(Error::invalid_input(format!(
                "{} is not a jar file",
                path.display()
            )));
        }
        require_non_empty(app_name, "appName")?;

        let jar = tokio::fs::read(path).await.map_err(|err| {
            error!(error = %err, "Error occurs when getting stream of the given jar file");
            Error::from(err)
        })?;
        self.upload_jar(jar, app_name).await
    }
}
