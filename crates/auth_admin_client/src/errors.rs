//! Error types for auth admin client operations.
//!
//! This module defines the error types that can occur when talking to the
//! administrative user endpoints of the authentication service.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during auth admin client operations.
///
/// Each variant carries enough context to print a useful line for the operator.
/// Callers that do not care about the difference between a network failure and
/// a rejected request can simply use the `Display` output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The admin API answered with a non-success status code.
    ///
    /// The contained message is the raw response body as returned by the server.
    #[error("Admin API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// Error deserializing the response from the admin API.
    #[error("Failed to deserialize admin API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The configured base URL of the service could not be used.
    #[error("Invalid service URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The requested user was not found.
    ///
    /// The contained string is the raw response body.
    #[error("User not found: {0}")]
    NotFound(String),

    /// Admin API rate limit has been exceeded.
    ///
    /// The contained string is the raw response body.
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// The request never produced a response (connection, TLS, timeout, ...).
    #[error("Failed to send request to admin API: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service role key was rejected.
    ///
    /// Returned for 401 and 403 responses, which usually means the key is not a
    /// service role key or belongs to another project.
    #[error("Service role key was rejected: {0}")]
    Unauthorized(String),
}
