//! Error types for sjs-client.

/// Result type alias for sjs-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all Spark Job Server client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Shorthand for an [`ErrorKind::InvalidInput`] error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput(message.into()))
    }

    /// Returns true if this error should trigger a host failover.
    ///
    /// Connection failures qualify: refused, reset or aborted connections,
    /// unreachable or unresolvable hosts and connect timeouts. HTTP error
    /// statuses, response timeouts and decoding failures never do.
    pub fn is_connectivity(&self) -> bool {
        matches!(self.kind, ErrorKind::Connection(_))
    }

    /// Returns the HTTP status if this is a status error.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the number of failover attempts if retries were exhausted.
    pub fn attempts(&self) -> Option<u32> {
        match &self.kind {
            ErrorKind::RetriesExhausted { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The server answered with a status the operation treats as failure.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// Connection or host resolution failure.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A connectivity failure occurred and no failover policy is configured.
    #[error("Connection error without failover policy: {0}")]
    NoFailover(String),

    /// Failover retries exhausted.
    #[error("Error occurs when retry to {operation}, retried {attempts} times")]
    RetriesExhausted {
        operation: &'static str,
        attempts: u32,
    },

    /// Invalid caller-supplied argument.
    #[error("Invalid parameters: {0}")]
    InvalidInput(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Local file or stream error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // A connect timeout is both `is_connect` and `is_timeout`.
        let kind = if err.is_connect() || is_connection_failure(&err) {
            ErrorKind::Connection(err.to_string())
        } else if err.is_timeout() {
            ErrorKind::Timeout
        } else {
            ErrorKind::Other(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

/// Returns true if an I/O error in the source chain shows the connection
/// itself broke (reset, aborted, refused or unreachable).
fn is_connection_failure(err: &(dyn std::error::Error + 'static)) -> bool {
    use std::io::ErrorKind as Io;

    let mut source = Some(err);
    while let Some(current) = source {
        if let Some(io) = current.downcast_ref::<std::io::Error>() {
            if matches!(
                io.kind(),
                Io::ConnectionReset
                    | Io::ConnectionAborted
                    | Io::ConnectionRefused
                    | Io::NotConnected
                    | Io::BrokenPipe
                    | Io::HostUnreachable
                    | Io::NetworkUnreachable
            ) {
                return true;
            }
        }
        source = current.source();
    }
    false
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_source(ErrorKind::Io(err.to_string()), err)
    }
}
