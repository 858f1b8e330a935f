//! JSON fixture loading and typed fixture views

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::driver::CannedResponse;
use crate::error::{E2eError, E2eResult};

/// Load one fixture by name from `dir`. The `.json` extension is implied
/// when absent.
pub fn load_fixture(dir: &Path, name: &str) -> E2eResult<Value> {
    let mut path = dir.join(name);
    if path.extension().is_none() {
        path.set_extension("json");
    }
    if !path.is_file() {
        return Err(E2eError::FixtureNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load every `.json` fixture under `dir` (recursively), keyed by file stem.
pub fn load_all(dir: &Path) -> E2eResult<HashMap<String, Value>> {
    let mut fixtures = HashMap::new();
    for entry in walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext == "json")
                .unwrap_or(false)
        })
    {
        let content = std::fs::read_to_string(entry.path())?;
        let stem = entry
            .path()
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        fixtures.insert(stem, serde_json::from_str(&content)?);
    }
    Ok(fixtures)
}

/// One set of credentials from the users fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// The `users` fixture: a known-good and a known-bad login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersFixture {
    pub valid_user: Credentials,
    pub invalid_user: Credentials,
}

impl UsersFixture {
    pub fn load(dir: &Path) -> E2eResult<Self> {
        Ok(serde_json::from_value(load_fixture(dir, "users")?)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    pub login: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponses {
    pub success_login: CannedResponse,
    pub failed_login: CannedResponse,
}

/// The `api` fixture: endpoint urls plus canned login responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFixture {
    pub endpoints: Endpoints,
    pub api_responses: ApiResponses,
}

impl ApiFixture {
    pub fn load(dir: &Path) -> E2eResult<Self> {
        Ok(serde_json::from_value(load_fixture(dir, "api")?)?)
    }
}
