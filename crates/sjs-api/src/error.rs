//! Error types for sjs-api.
//!
//! The API client reports the same errors as the HTTP layer it wraps.

pub use sjs_client::{Error, ErrorKind, Result};
