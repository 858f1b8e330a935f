//! Error types for the E2E harness
//!
//! Retry exhaustion in [`crate::api::api_request`] is deliberately not an
//! error: the last failing response is returned and the caller asserts on
//! its status.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("Timed out after {timeout_ms}ms waiting for {what}")]
    Timeout { what: String, timeout_ms: u64 },

    #[error("Uncaught page error: {0}")]
    PageError(String),

    #[error("Driver error: {0}")]
    Driver(String),

    #[error("Playwright not found. Install with: npx playwright install")]
    PlaywrightNotFound,

    #[error("Fixture not found: {0}")]
    FixtureNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;
