//! Error types for the notebook API client.
//!
//! # Design
//! Only two things can fail: getting bytes back from the server, and reading
//! those bytes as XML. HTTP status codes and the API's own `<CHYBA>` error
//! documents are not errors here; they reach the caller inside the response.
//! A faculty lookup miss is `None`, never an error.

use thiserror::Error;

/// Errors returned by `IsClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout, or the body could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body is not a well-formed XML document.
    #[error("XML parse error: {0}")]
    Parse(String),
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<xmltree::ParseError> for ApiError {
    fn from(err: xmltree::ParseError) -> Self {
        ApiError::Parse(err.to_string())
    }
}
