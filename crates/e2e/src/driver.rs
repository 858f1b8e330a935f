//! Primitive provider traits supplied by a host browser/network backend
//!
//! The harness core never touches a browser or socket directly; it drives
//! these traits. Production backends live in [`crate::playwright`] (DOM and
//! interception) and [`crate::http`] (direct requests). Unit tests use the
//! scripted fake in [`crate::queue`].
//!
//! Every method call corresponds to one enqueued host action; implementations
//! must execute actions in the order issued (strict FIFO within a test), not
//! concurrently.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde_json::Value;

use crate::error::E2eResult;

/// HTTP method for requests and intercept rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
            Method::Patch => write!(f, "PATCH"),
        }
    }
}

/// Options for a direct request
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

/// Opaque result of a network call: status plus structured body, read-only
/// to the utility layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }
}

/// A canned response body for a short-circuited intercept. Field names match
/// the fixture wire shape (`statusCode`/`body`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CannedResponse {
    pub status_code: u16,
    pub body: Value,
}

impl From<CannedResponse> for Response {
    fn from(canned: CannedResponse) -> Self {
        Response::new(canned.status_code, canned.body)
    }
}

/// Describes one interceptable network route. Consumed once at registration
/// and not retained by the utility layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    pub method: Method,
    pub url: String,
    pub alias: String,
    /// When present, the intercept answers with this response verbatim and
    /// the real network is never hit; when absent the call passes through
    /// and is only observed under `alias`.
    #[serde(default)]
    pub response: Option<CannedResponse>,
}

impl EndpointDescriptor {
    pub fn observe(method: Method, url: impl Into<String>, alias: impl Into<String>) -> Self {
        Self { method, url: url.into(), alias: alias.into(), response: None }
    }

    pub fn mock(
        method: Method,
        url: impl Into<String>,
        alias: impl Into<String>,
        response: CannedResponse,
    ) -> Self {
        Self { method, url: url.into(), alias: alias.into(), response: Some(response) }
    }
}

/// DOM primitive provider: navigation, querying, input and assertions.
pub trait PageDriver {
    fn visit(&self, url: &str) -> E2eResult<()>;

    fn click(&self, selector: &str) -> E2eResult<()>;

    /// Clears the field first, then enters the text.
    fn type_text(&self, selector: &str, text: &str) -> E2eResult<()>;

    fn assert_visible(&self, selector: &str) -> E2eResult<()>;

    fn assert_contains_text(&self, selector: &str, text: &str) -> E2eResult<()>;

    fn wait_for_element(&self, selector: &str, timeout_ms: u64) -> E2eResult<()>;

    fn title(&self) -> E2eResult<String>;

    fn current_url(&self) -> E2eResult<String>;

    fn assert_url_contains(&self, fragment: &str) -> E2eResult<()>;

    fn assert_url_not_contains(&self, fragment: &str) -> E2eResult<()>;

    fn wait_for_page_load(&self) -> E2eResult<()>;

    /// Click the element inside `selector` whose visible text contains `text`.
    fn click_containing(&self, selector: &str, text: &str) -> E2eResult<()>;
}

/// Direct-request provider for API calls outside the browser.
pub trait RequestDriver {
    fn issue_request(
        &self,
        method: Method,
        url: &str,
        options: &RequestOptions,
    ) -> E2eResult<Response>;

    /// A delay inserted into the host command queue, blocking from the
    /// test's perspective. Not a background timer.
    fn pause(&self, duration: Duration);
}

/// Network-interception provider: register observing/mocking routes and wait
/// for aliased calls to complete.
pub trait InterceptDriver {
    /// Registers one rule. Duplicate aliases silently overwrite; no
    /// collision detection is performed.
    fn register_intercept(&self, endpoint: &EndpointDescriptor) -> E2eResult<()>;

    /// Awaits completion of the aliased call within `timeout_ms`.
    fn await_intercept(&self, alias: &str, timeout_ms: u64) -> E2eResult<Response>;
}
