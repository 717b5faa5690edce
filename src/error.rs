//! Error type for dispatch and handler operations.

use std::error::Error;

use thiserror::Error;

use crate::scope::ResolveError;

/// Error returned by `Dispatcher::dispatch`.
///
/// `HandlerNotFound`, `UnknownRequest` and `Resolution` come from the
/// dispatch layer itself. Every other variant is produced by handlers and
/// reaches the caller exactly as the handler returned it.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// No decorator and no primary handler registered for this request type.
    #[error("no handler registered for request {request}")]
    HandlerNotFound { request: &'static str },
    /// No gateway route is registered under this name.
    #[error("unknown request: {0}")]
    UnknownRequest(String),
    /// A handler is registered but the scope could not produce it.
    #[error("could not resolve handler {handler}: {source}")]
    Resolution {
        handler: &'static str,
        #[source]
        source: ResolveError,
    },
    /// Payload decode / deserialization failed.
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    /// Business logic rejected the request (validation, invariant violation).
    #[error("rejected: {0}")]
    Rejected(String),
    /// Entity or resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Missing or invalid authentication / authorization.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// The handler observed cancellation and stopped.
    #[error("cancelled")]
    Cancelled,
    /// Other error.
    #[error("handler error: {0}")]
    Other(Box<dyn Error + Send + Sync>),
}

impl HandlerError {
    /// Wrap any error as `HandlerError::Other`.
    pub fn other<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        HandlerError::Other(Box::new(err))
    }

    /// Whether this error is a configuration problem rather than a handler
    /// outcome.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            HandlerError::HandlerNotFound { .. }
                | HandlerError::UnknownRequest(_)
                | HandlerError::Resolution { .. }
        )
    }

    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::HandlerNotFound { .. } => 404,
            HandlerError::UnknownRequest(_) => 404,
            HandlerError::Resolution { .. } => 500,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::Rejected(_) => 422,
            HandlerError::NotFound(_) => 404,
            HandlerError::Unauthorized(_) => 401,
            HandlerError::Cancelled => 499,
            HandlerError::Other(_) => 500,
        }
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}
