//! Basic-auth credentials.
//!
//! The password is redacted in Debug output.

/// Username and password sent as HTTP basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Create new credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Load credentials from environment variables.
    ///
    /// Reads `SPARK_JOBSERVER_USERNAME` and `SPARK_JOBSERVER_PASSWORD`.
    /// Returns `None` unless both are set.
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("SPARK_JOBSERVER_USERNAME").ok()?;
        let password = std::env::var("SPARK_JOBSERVER_PASSWORD").ok()?;
        Some(Self::new(username, password))
    }

    /// The username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns true if both username and password are non-blank.
    ///
    /// Only complete credentials are attached to requests.
    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.trim().is_empty()
    }
}
