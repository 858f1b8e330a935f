//! Playwright-backed browser driver
//!
//! Drives a real browser through generated Node.js scripts executed via
//! `node`. Commands buffer in the [`CommandQueue`] in issue order and are
//! rendered into one script per flush; a flush happens when a read-back is
//! needed (`title`, `current_url`, awaiting an intercept) or when the caller
//! invokes [`PlaywrightDriver::finish`]. Deferred assertion failures surface
//! at the flush that executes them, which is the host-queue behavior every
//! other part of the harness assumes.
//!
//! Canned intercepts render as `page.route` fulfillments; observed aliases
//! arm a `waitForResponse` promise at registration and resolve it when the
//! alias is awaited.

use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::process::{Command as ProcessCommand, Stdio};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::SuiteConfig;
use crate::driver::{EndpointDescriptor, InterceptDriver, PageDriver, Response};
use crate::error::{E2eError, E2eResult};
use crate::queue::{Command, CommandQueue};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl std::str::FromStr for Browser {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chromium" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" => Ok(Browser::Webkit),
            other => Err(E2eError::Driver(format!("unknown browser: {other}"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlaywrightConfig {
    pub base_url: String,
    pub browser: Browser,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            browser: Browser::Chromium,
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

impl PlaywrightConfig {
    /// Carry the suite-level knobs over; browser choice and headless mode are
    /// launch concerns the suite config does not hold.
    pub fn from_suite(suite: &SuiteConfig) -> Self {
        Self {
            base_url: suite.base_url.clone(),
            viewport_width: suite.viewport.width,
            viewport_height: suite.viewport.height,
            ..Self::default()
        }
    }
}

#[derive(Default)]
struct DriverState {
    /// URL the last flush ended on; the next flush resumes from it
    last_url: Option<String>,
    last_title: String,
    /// Intercept descriptors by alias, needed to render route rules
    intercepts: HashMap<String, EndpointDescriptor>,
    /// Responses collected for awaited aliases
    responses: HashMap<String, Response>,
}

pub struct PlaywrightDriver {
    config: PlaywrightConfig,
    queue: Arc<CommandQueue>,
    state: Mutex<DriverState>,
}

/// Terminal JSON line emitted by a generated script
#[derive(Debug, Deserialize)]
struct FlushOutcome {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    responses: HashMap<String, RawResponse>,
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    status: u16,
    body: Value,
}

impl PlaywrightDriver {
    pub fn new(config: PlaywrightConfig) -> E2eResult<Self> {
        Self::check_playwright_installed()?;
        Ok(Self {
            config,
            queue: Arc::new(CommandQueue::new()),
            state: Mutex::new(DriverState::default()),
        })
    }

    fn check_playwright_installed() -> E2eResult<()> {
        let status = ProcessCommand::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::PlaywrightNotFound),
        }
    }

    /// Shared handle to the buffered command queue
    pub fn queue(&self) -> Arc<CommandQueue> {
        Arc::clone(&self.queue)
    }

    /// Execute everything still buffered. Call at the end of a test so that
    /// trailing assertions actually run.
    pub fn finish(&self) -> E2eResult<()> {
        self.flush()
    }

    /// Url the last flush ended on. An error before any navigation keeps a
    /// url assertion from silently passing against an empty string.
    fn cached_url(&self) -> E2eResult<String> {
        self.state
            .lock()
            .last_url
            .clone()
            .ok_or_else(|| E2eError::Driver("no page loaded yet".to_string()))
    }

    fn flush(&self) -> E2eResult<()> {
        let commands = self.queue.drain();
        if commands.is_empty() {
            return Ok(());
        }

        let script = self.build_script(&commands);
        let outcome = self.run_script(&script)?;

        let mut state = self.state.lock();
        if !outcome.url.is_empty() {
            state.last_url = Some(outcome.url);
        }
        state.last_title = outcome.title;
        for (alias, raw) in outcome.responses {
            state.responses.insert(alias, Response::new(raw.status, raw.body));
        }

        if !outcome.success {
            let message = outcome.error.unwrap_or_else(|| "script failed".to_string());
            // generated assertion throws use an "expected ..." message
            if message.starts_with("expected") {
                return Err(E2eError::AssertionFailed(message));
            }
            return Err(E2eError::Driver(message));
        }
        Ok(())
    }

    fn run_script(&self, script: &str) -> E2eResult<FlushOutcome> {
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("session.js");
        std::fs::write(&script_path, script)?;

        debug!("running generated script: {}", script_path.display());

        let output = ProcessCommand::new("node")
            .arg(&script_path)
            .current_dir(temp_dir.path())
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        // the script prints one terminal JSON line, possibly after page logs
        let outcome = stdout
            .lines()
            .rev()
            .find_map(|line| serde_json::from_str::<FlushOutcome>(line.trim()).ok());

        match outcome {
            Some(outcome) => Ok(outcome),
            None => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                warn!("script produced no result line");
                Err(E2eError::Driver(format!(
                    "script failed:\nstdout: {stdout}\nstderr: {stderr}"
                )))
            }
        }
    }

    fn build_script(&self, commands: &[Command]) -> String {
        let state = self.state.lock();
        let mut script = format!(
            r#"const {{ {browser} }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  const baseUrl = '{base_url}';
  const results = {{ responses: {{}} }};
  const pending = {{}};

  try {{
"#,
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            width = self.config.viewport_width,
            height = self.config.viewport_height,
            base_url = js_str(&self.config.base_url),
        );

        if let Some(last_url) = &state.last_url {
            script.push_str(&format!(
                "    await page.goto('{}');\n",
                js_str(last_url)
            ));
        }

        for command in commands {
            script.push_str(&self.render(command, &state));
            script.push('\n');
        }

        script.push_str(
            r#"
    console.log(JSON.stringify({
      success: true,
      title: await page.title(),
      url: page.url(),
      responses: results.responses,
    }));
  } catch (error) {
    console.log(JSON.stringify({ success: false, error: error.message }));
    process.exitCode = 1;
  } finally {
    await browser.close();
  }
})();
"#,
        );

        script
    }

    fn render(&self, command: &Command, state: &DriverState) -> String {
        match command {
            Command::Visit { url } => {
                let target = if url.starts_with('/') {
                    format!("baseUrl + '{}'", js_str(url))
                } else {
                    format!("'{}'", js_str(url))
                };
                format!("    await page.goto({target});")
            }
            Command::Click { selector } => {
                format!("    await page.click('{}');", js_str(selector))
            }
            Command::TypeText { selector, text } => {
                let selector = js_str(selector);
                format!(
                    "    await page.fill('{selector}', '');\n    await page.fill('{selector}', '{}');",
                    js_str(text)
                )
            }
            Command::AssertVisible { selector } => {
                let selector = js_str(selector);
                format!(
                    "    if (!await page.isVisible('{selector}')) throw new Error('expected {selector} to be visible');"
                )
            }
            Command::AssertContainsText { selector, text } => {
                let selector = js_str(selector);
                let text = js_str(text);
                format!(
                    "    {{ const t = await page.textContent('{selector}'); if (t === null || !t.includes('{text}')) throw new Error('expected {selector} to contain {text}'); }}"
                )
            }
            Command::WaitForElement { selector, timeout_ms } => {
                format!(
                    "    await page.waitForSelector('{}', {{ state: 'visible', timeout: {timeout_ms} }});",
                    js_str(selector)
                )
            }
            // title and url are reported by the flush epilogue
            Command::Title | Command::CurrentUrl => String::from("    // read-back"),
            Command::AssertUrlContains { fragment, negated } => {
                let fragment = js_str(fragment);
                if *negated {
                    format!(
                        "    if (page.url().includes('{fragment}')) throw new Error('expected url to not contain {fragment}');"
                    )
                } else {
                    format!(
                        "    if (!page.url().includes('{fragment}')) throw new Error('expected url to contain {fragment}');"
                    )
                }
            }
            Command::WaitForPageLoad => String::from("    await page.waitForLoadState('load');"),
            Command::ClickContaining { selector, text } => {
                format!(
                    "    await page.locator('{}').getByText('{}').first().click();",
                    js_str(selector),
                    js_str(text)
                )
            }
            Command::RegisterIntercept { alias, url, method, .. } => {
                let mut rendered = String::new();
                let pattern = js_str(url);
                let alias_js = js_str(alias);
                let method_js = method.to_string();
                if let Some(endpoint) = state.intercepts.get(alias) {
                    if let Some(canned) = &endpoint.response {
                        let body = serde_json::to_string(&canned.body).unwrap_or_default();
                        rendered.push_str(&format!(
                            "    await page.route('**{pattern}', route => route.fulfill({{ status: {}, contentType: 'application/json', body: JSON.stringify({body}) }}));\n",
                            canned.status_code
                        ));
                    }
                }
                // arm the observer before anything can trigger the call
                rendered.push_str(&format!(
                    "    pending['{alias_js}'] = page.waitForResponse(r => r.url().includes('{pattern}') && r.request().method() === '{method_js}');"
                ));
                rendered
            }
            Command::AwaitIntercept { alias, timeout_ms } => {
                let alias_js = js_str(alias);
                format!(
                    "    {{ const r = await Promise.race([pending['{alias_js}'], new Promise((_, reject) => setTimeout(() => reject(new Error('Timed out waiting for @{alias_js}')), {timeout_ms}))]); results.responses['{alias_js}'] = {{ status: r.status(), body: await r.json().catch(() => null) }}; }}"
                )
            }
            Command::Pause { ms } => format!("    await page.waitForTimeout({ms});"),
            // direct requests go through the HTTP driver, never the browser
            Command::IssueRequest { .. } => String::from("    // handled out of band"),
        }
    }
}

impl PageDriver for PlaywrightDriver {
    fn visit(&self, url: &str) -> E2eResult<()> {
        self.queue.push(Command::Visit { url: url.to_string() });
        Ok(())
    }

    fn click(&self, selector: &str) -> E2eResult<()> {
        self.queue.push(Command::Click { selector: selector.to_string() });
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
        Ok(())
    }

    fn assert_contains_text(&self, selector: &str, text: &str) -> E2eResult<()> {
        self.queue.push(Command::AssertContainsText {
            selector: selector.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    fn wait_for_element(&self, selector: &str, timeout_ms: u64) -> E2eResult<()> {
        self.queue.push(Command::WaitForElement {
            selector: selector.to_string(),
            timeout_ms,
        });
        Ok(())
    }

    fn title(&self) -> E2eResult<String> {
        self.queue.push(Command::Title);
        self.flush()?;
        Ok(self.state.lock().last_title.clone())
    }

    fn current_url(&self) -> E2eResult<String> {
        self.queue.push(Command::CurrentUrl);
        self.flush()?;
        self.cached_url()
    }

    fn assert_url_contains(&self, fragment: &str) -> E2eResult<()> {
        self.queue.push(Command::AssertUrlContains {
            fragment: fragment.to_string(),
            negated: false,
        });
        Ok(())
    }

    fn assert_url_not_contains(&self, fragment: &str) -> E2eResult<()> {
        self.queue.push(Command::AssertUrlContains {
            fragment: fragment.to_string(),
            negated: true,
        });
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
        Ok(())
    }
}

impl InterceptDriver for PlaywrightDriver {
    fn register_intercept(&self, endpoint: &EndpointDescriptor) -> E2eResult<()> {
        // descriptor stored first so rendering can see the canned response
        self.state
            .lock()
            .intercepts
            .insert(endpoint.alias.clone(), endpoint.clone());
        self.queue.push(Command::RegisterIntercept {
            method: endpoint.method,
            url: endpoint.url.clone(),
            alias: endpoint.alias.clone(),
            mocked: endpoint.response.is_some(),
        });
        Ok(())
    }

    fn await_intercept(&self, alias: &str, timeout_ms: u64) -> E2eResult<Response> {
        self.queue.push(Command::AwaitIntercept {
            alias: alias.to_string(),
            timeout_ms,
        });
        match self.flush() {
            Ok(()) => {}
            Err(E2eError::Driver(message)) if message.contains("Timed out waiting for") => {
                return Err(E2eError::Timeout {
                    what: format!("alias @{alias}"),
                    timeout_ms,
                });
            }
            Err(e) => return Err(e),
        }
        self.state
            .lock()
            .responses
            .get(alias)
            .cloned()
            .ok_or_else(|| E2eError::Timeout {
                what: format!("alias @{alias}"),
                timeout_ms,
            })
    }
}

fn js_str(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "\\n")
}
