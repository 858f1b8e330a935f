//! Suite configuration
//!
//! Loaded from YAML or built from defaults. Carries the knobs shared across
//! page objects, API utilities and the session collaborator, including the
//! uncaught-page-error suppression policy.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::E2eResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Base URL of the application under test
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Browser viewport
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,

    /// Default timeout for element waits and aliased network calls
    #[serde(default = "default_command_timeout")]
    pub default_timeout_ms: u64,

    /// Retry budget for server-error responses in `api_request`
    #[serde(default = "default_request_retries")]
    pub request_retries: u32,

    /// Directory holding JSON fixtures
    #[serde(default = "default_fixtures_dir")]
    pub fixtures_dir: PathBuf,

    /// When true, uncaught errors raised by the page under test are logged
    /// and swallowed instead of failing the current test. This is an
    /// explicit policy (spurious page errors are unrelated to the flow under
    /// test), not a bug.
    #[serde(default = "default_suppress")]
    pub suppress_page_errors: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_viewport() -> Viewport {
    Viewport { width: 1280, height: 720 }
}

fn default_command_timeout() -> u64 {
    crate::api::DEFAULT_WAIT_TIMEOUT_MS
}

fn default_request_retries() -> u32 {
    crate::api::DEFAULT_RETRIES
}

fn default_fixtures_dir() -> PathBuf {
    PathBuf::from("fixtures")
}

fn default_suppress() -> bool {
    true
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            viewport: default_viewport(),
            default_timeout_ms: default_command_timeout(),
            request_retries: default_request_retries(),
            fixtures_dir: default_fixtures_dir(),
            suppress_page_errors: default_suppress(),
        }
    }
}

impl SuiteConfig {
    /// Parse a suite config from YAML
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a suite config from a YAML file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SuiteConfig::default();
        assert_eq!(config.default_timeout_ms, 10_000);
        assert_eq!(config.request_retries, 3);
        assert_eq!(config.viewport.width, 1280);
        assert!(config.suppress_page_errors);
    }

    #[test]
    fn defaults_track_api_constants() {
        let config = SuiteConfig::default();
        assert_eq!(config.request_retries, crate::api::DEFAULT_RETRIES);
        assert_eq!(config.default_timeout_ms, crate::api::DEFAULT_WAIT_TIMEOUT_MS);
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let yaml = r#"
base_url: "https://staging.example.com"
suppress_page_errors: false
"#;
        let config = SuiteConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.base_url, "https://staging.example.com");
        assert!(!config.suppress_page_errors);
        assert_eq!(config.request_retries, 3);
        assert_eq!(config.viewport.height, 720);
    }
}
