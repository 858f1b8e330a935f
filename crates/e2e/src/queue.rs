//! Explicit host command queue and a scripted fake driver
//!
//! The host test framework executes every browser/network action in strict
//! FIFO order within a test, regardless of call syntax. [`CommandQueue`]
//! makes that contract concrete: drivers append one [`Command`] per primitive
//! in issue order, and the queue snapshot is the ground truth for ordering
//! assertions.
//!
//! [`ScriptedDriver`] implements all three provider traits against the queue
//! with scripted outcomes instead of a real browser. It is the unit-test
//! vehicle for page objects and API utilities.

use parking_lot::Mutex;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use crate::driver::{
    EndpointDescriptor, InterceptDriver, Method, PageDriver, RequestDriver, RequestOptions,
    Response,
};
use crate::error::{E2eError, E2eResult};

/// One enqueued host action
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Visit { url: String },
    Click { selector: String },
    TypeText { selector: String, text: String },
    AssertVisible { selector: String },
    AssertContainsText { selector: String, text: String },
    WaitForElement { selector: String, timeout_ms: u64 },
    Title,
    CurrentUrl,
    AssertUrlContains { fragment: String, negated: bool },
    WaitForPageLoad,
    ClickContaining { selector: String, text: String },
    IssueRequest { method: Method, url: String },
    RegisterIntercept { method: Method, url: String, alias: String, mocked: bool },
    AwaitIntercept { alias: String, timeout_ms: u64 },
    Pause { ms: u64 },
}

/// FIFO queue of issued commands
#[derive(Default)]
pub struct CommandQueue {
    inner: Mutex<Vec<Command>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, command: Command) {
        self.inner.lock().push(command);
    }

    /// Copy of the queue contents in issue order
    pub fn snapshot(&self) -> Vec<Command> {
        self.inner.lock().clone()
    }

    /// Remove and return all queued commands in issue order
    pub fn drain(&self) -> Vec<Command> {
        std::mem::take(&mut *self.inner.lock())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

/// Fake provider with scripted outcomes.
///
/// Defaults are permissive: every element is present and visible with empty
/// text, requests answer `200 {}`. Tests script deviations (hidden elements,
/// element text, URL transitions on click, canned response sequences) before
/// driving the code under test, then assert on the recorded command order.
pub struct ScriptedDriver {
    queue: Arc<CommandQueue>,
    state: Mutex<ScriptedState>,
}

#[derive(Default)]
struct ScriptedState {
    current_url: String,
    title: String,
    hidden: HashSet<String>,
    texts: HashMap<String, String>,
    // selector -> url the page lands on when it is clicked
    click_navigations: HashMap<String, String>,
    // (selector, contained text) -> landing url
    contains_navigations: HashMap<(String, String), String>,
    responses: Vec<Response>,
    intercepts: HashMap<String, Response>,
    stalled: HashSet<String>,
}

impl Default for ScriptedDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(CommandQueue::new()),
            state: Mutex::new(ScriptedState {
                current_url: "/".to_string(),
                ..Default::default()
            }),
        }
    }

    /// Shared handle to the recorded command queue
    pub fn queue(&self) -> Arc<CommandQueue> {
        Arc::clone(&self.queue)
    }

    /// Recorded commands in issue order
    pub fn commands(&self) -> Vec<Command> {
        self.queue.snapshot()
    }

    pub fn set_title(&self, title: &str) {
        self.state.lock().title = title.to_string();
    }

    /// Script an element as not visible; `assert_visible` and
    /// `wait_for_element` on it will fail.
    pub fn hide(&self, selector: &str) {
        self.state.lock().hidden.insert(selector.to_string());
    }

    pub fn set_text(&self, selector: &str, text: &str) {
        self.state
            .lock()
            .texts
            .insert(selector.to_string(), text.to_string());
    }

    /// Script a navigation: clicking `selector` lands the page on `url`.
    pub fn navigate_on_click(&self, selector: &str, url: &str) {
        self.state
            .lock()
            .click_navigations
            .insert(selector.to_string(), url.to_string());
    }

    /// Script a navigation for a contains-text click inside `selector`.
    pub fn navigate_on_click_containing(&self, selector: &str, text: &str, url: &str) {
        self.state
            .lock()
            .contains_navigations
            .insert((selector.to_string(), text.to_string()), url.to_string());
    }

    /// Script the responses returned by successive `issue_request` calls, in
    /// order. Once exhausted, requests answer `200 {}` again.
    pub fn script_responses(&self, responses: Vec<Response>) {
        let mut state = self.state.lock();
        state.responses = responses;
        state.responses.reverse(); // pop from the back in script order
    }

    /// Script an alias as never completing; awaiting it times out.
    pub fn stall(&self, alias: &str) {
        self.state.lock().stalled.insert(alias.to_string());
    }

    /// Count of recorded commands matching a predicate
    pub fn count_commands(&self, predicate: impl Fn(&Command) -> bool) -> usize {
        self.queue.snapshot().iter().filter(|c| predicate(c)).count()
    }
}

impl PageDriver for ScriptedDriver {
    fn visit(&self, url: &str) -> E2eResult<()> {
        self.queue.push(Command::Visit { url: url.to_string() });
        self.state.lock().current_url = url.to_string();
        Ok(())
    }

    fn click(&self, selector: &str) -> E2eResult<()> {
        self.queue.push(Command::Click { selector: selector.to_string() });
        let mut state = self.state.lock();
        if let Some(url) = state.click_navigations.get(selector).cloned() {
            state.current_url = url;
        }
        Ok(())
    }

    fn type_text(&self, selector: &str, text: &str) -> E2eResult<()> {
        self.queue.push(Command::TypeText {
            selector: selector.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    fn assert_visible(&self, selector: &str) -> E2eResult<()> {
        self.queue.push(Command::AssertVisible { selector: selector.to_string() });
        if self.state.lock().hidden.contains(selector) {
            return Err(E2eError::AssertionFailed(format!(
                "expected {selector} to be visible"
            )));
        }
        Ok(())
    }

    fn assert_contains_text(&self, selector: &str, text: &str) -> E2eResult<()> {
        self.queue.push(Command::AssertContainsText {
            selector: selector.to_string(),
            text: text.to_string(),
        });
        let state = self.state.lock();
        let actual = state.texts.get(selector).map(String::as_str).unwrap_or("");
        if !actual.contains(text) {
            return Err(E2eError::AssertionFailed(format!(
                "expected {selector} to contain {text:?}, found {actual:?}"
            )));
        }
        Ok(())
    }

    fn wait_for_element(&self, selector: &str, timeout_ms: u64) -> E2eResult<()> {
        self.queue.push(Command::WaitForElement {
            selector: selector.to_string(),
            timeout_ms,
        });
        if self.state.lock().hidden.contains(selector) {
            return Err(E2eError::Timeout {
                what: format!("element {selector}"),
                timeout_ms,
            });
        }
        Ok(())
    }

    fn title(&self) -> E2eResult<String> {
        self.queue.push(Command::Title);
        Ok(self.state.lock().title.clone())
    }

    fn current_url(&self) -> E2eResult<String> {
        self.queue.push(Command::CurrentUrl);
        Ok(self.state.lock().current_url.clone())
    }

    fn assert_url_contains(&self, fragment: &str) -> E2eResult<()> {
        self.queue.push(Command::AssertUrlContains {
            fragment: fragment.to_string(),
            negated: false,
        });
        let url = self.state.lock().current_url.clone();
        if !url.contains(fragment) {
            return Err(E2eError::AssertionFailed(format!(
                "expected url {url:?} to contain {fragment:?}"
            )));
        }
        Ok(())
    }

    fn assert_url_not_contains(&self, fragment: &str) -> E2eResult<()> {
        self.queue.push(Command::AssertUrlContains {
            fragment: fragment.to_string(),
            negated: true,
        });
        let url = self.state.lock().current_url.clone();
        if url.contains(fragment) {
            return Err(E2eError::AssertionFailed(format!(
                "expected url {url:?} to not contain {fragment:?}"
            )));
        }
        Ok(())
    }

    fn wait_for_page_load(&self) -> E2eResult<()> {
        self.queue.push(Command::WaitForPageLoad);
        Ok(())
    }

    fn click_containing(&self, selector: &str, text: &str) -> E2eResult<()> {
        self.queue.push(Command::ClickContaining {
            selector: selector.to_string(),
            text: text.to_string(),
        });
        let mut state = self.state.lock();
        let key = (selector.to_string(), text.to_string());
        if let Some(url) = state.contains_navigations.get(&key).cloned() {
            state.current_url = url;
        }
        Ok(())
    }
}

impl RequestDriver for ScriptedDriver {
    fn issue_request(
        &self,
        method: Method,
        url: &str,
        _options: &RequestOptions,
    ) -> E2eResult<Response> {
        self.queue.push(Command::IssueRequest { method, url: url.to_string() });
        let scripted = self.state.lock().responses.pop();
        Ok(scripted.unwrap_or_else(|| Response::new(200, json!({}))))
    }

    fn pause(&self, duration: Duration) {
        self.queue.push(Command::Pause { ms: duration.as_millis() as u64 });
    }
}

impl InterceptDriver for ScriptedDriver {
    fn register_intercept(&self, endpoint: &EndpointDescriptor) -> E2eResult<()> {
        self.queue.push(Command::RegisterIntercept {
            method: endpoint.method,
            url: endpoint.url.clone(),
            alias: endpoint.alias.clone(),
            mocked: endpoint.response.is_some(),
        });
        let response = endpoint
            .response
            .clone()
            .map(Response::from)
            .unwrap_or_else(|| Response::new(200, json!({})));
        // last registration wins, matching the host's alias semantics
        self.state
            .lock()
            .intercepts
            .insert(endpoint.alias.clone(), response);
        Ok(())
    }

    fn await_intercept(&self, alias: &str, timeout_ms: u64) -> E2eResult<Response> {
        self.queue.push(Command::AwaitIntercept {
            alias: alias.to_string(),
            timeout_ms,
        });
        let state = self.state.lock();
        if state.stalled.contains(alias) {
            return Err(E2eError::Timeout {
                what: format!("alias @{alias}"),
                timeout_ms,
            });
        }
        state
            .intercepts
            .get(alias)
            .cloned()
            .ok_or_else(|| E2eError::Timeout {
                what: format!("alias @{alias}"),
                timeout_ms,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_preserves_issue_order() {
        let driver = ScriptedDriver::new();
        driver.visit("/login").unwrap();
        driver.type_text("[data-test=\"username\"]", "u").unwrap();
        driver.click("[data-test=\"login-button\"]").unwrap();

        let commands = driver.commands();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], Command::Visit { .. }));
        assert!(matches!(commands[1], Command::TypeText { .. }));
        assert!(matches!(commands[2], Command::Click { .. }));
    }

    #[test]
    fn drain_empties_the_queue() {
        let driver = ScriptedDriver::new();
        driver.visit("/").unwrap();
        let queue = driver.queue();
        assert_eq!(queue.drain().len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn scripted_click_navigation_updates_url() {
        let driver = ScriptedDriver::new();
        driver.navigate_on_click("[data-test=\"logout-button\"]", "/login");
        driver.visit("/home").unwrap();
        driver.click("[data-test=\"logout-button\"]").unwrap();
        assert!(driver.assert_url_contains("/login").is_ok());
    }

    #[test]
    fn hidden_element_fails_visibility_and_wait() {
        let driver = ScriptedDriver::new();
        driver.hide("#gone");
        assert!(matches!(
            driver.assert_visible("#gone"),
            Err(E2eError::AssertionFailed(_))
        ));
        assert!(matches!(
            driver.wait_for_element("#gone", 500),
            Err(E2eError::Timeout { .. })
        ));
    }

    #[test]
    fn unregistered_alias_times_out() {
        let driver = ScriptedDriver::new();
        assert!(matches!(
            driver.await_intercept("nope", 100),
            Err(E2eError::Timeout { timeout_ms: 100, .. })
        ));
    }

    #[test]
    fn duplicate_alias_silently_overwrites() {
        let driver = ScriptedDriver::new();
        let first = EndpointDescriptor::mock(
            Method::Get,
            "/api/a",
            "dup",
            crate::driver::CannedResponse { status_code: 200, body: json!({"v": 1}) },
        );
        let second = EndpointDescriptor::mock(
            Method::Get,
            "/api/a",
            "dup",
            crate::driver::CannedResponse { status_code: 201, body: json!({"v": 2}) },
        );
        driver.register_intercept(&first).unwrap();
        driver.register_intercept(&second).unwrap();

        let response = driver.await_intercept("dup", 1000).unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.body, json!({"v": 2}));
    }
}
