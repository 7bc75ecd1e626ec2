//! Unified error types for the routing engine
//!
//! This module defines error types that:
//! - Are serializable for frontend consumption
//! - Distinguish misconfiguration from network-attributable failures
//! - Carry enough detail to tell the user which backend failed and why

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Engine error type for routing and discovery
///
/// All errors are serializable so they can be sent to the frontend.
/// Per-backend failures are recovered inside the router loop; only
/// `AllBackendsFailed` ever reaches the caller of `send_message`.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum EmberError {
    /// A required descriptor field is absent or invalid. Detected before
    /// any network call is attempted; never retried.
    #[error("Backend misconfigured: {0}")]
    Misconfigured(String),

    /// No response within the fixed per-call window.
    #[error("Backend timeout: {0}")]
    Timeout(String),

    /// Non-2xx HTTP status; includes status and body where available.
    #[error("Backend HTTP error: {0}")]
    Http(String),

    /// Response parsed but no extractable text on any known path.
    #[error("No content in response: {0}")]
    EmptyContent(String),

    /// Transport-level failure (connection refused, DNS, TLS).
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not valid JSON.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Terminal: every configured backend was tried and failed. The
    /// message enumerates each descriptor name and its failure in
    /// attempt order.
    #[error("All AI backends failed:\n{0}")]
    AllBackendsFailed(String),
}

impl From<serde_json::Error> for EmberError {
    fn from(err: serde_json::Error) -> Self {
        EmberError::Parse(err.to_string())
    }
}

/// Result type alias using EmberError
pub type Result<T> = std::result::Result<T, EmberError>;
