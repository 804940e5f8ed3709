//! Error types for rate resolution.

use std::time::Duration;
use thiserror::Error;

/// Failure causes on the rate resolution path.
///
/// The variants are kept apart for diagnostics. The resolver treats all of
/// them the same way: serve a cached rate if one exists, otherwise surface
/// the error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RateError {
    /// Caller input rejected before any lookup.
    #[error("{0}")]
    Validation(String),

    /// Transport failure while talking to a provider.
    #[error("Request error: {0}")]
    Network(String),

    /// Provider answered with a non-success HTTP status.
    #[error("HTTP error: {status} for {context}")]
    Status { status: u16, context: String },

    /// Provider call did not finish within the configured timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Body was not valid JSON or had an unexpected shape.
    #[error("Failed to parse response for {context}: {reason}")]
    Parse { context: String, reason: String },

    /// Requested code is absent from the provider response.
    #[error("Rate not found: {0}")]
    NotFound(String),

    /// A zero price where a usable rate or divisor was required.
    #[error("Zero rate for {0}")]
    ZeroRate(String),
}

impl RateError {
    pub(crate) fn parse(context: impl Into<String>, reason: impl ToString) -> Self {
        RateError::Parse {
            context: context.into(),
            reason: reason.to_string(),
        }
    }
}
