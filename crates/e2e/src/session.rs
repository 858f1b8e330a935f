//! Login session collaborator
//!
//! Caches per-credentials login so tests that share a user drive the login
//! form only once per process, and owns the uncaught-page-error policy:
//! errors raised by the page under test are unrelated to most flows, so by
//! default they are logged and swallowed rather than failing the test.

use parking_lot::Mutex;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::config::SuiteConfig;
use crate::driver::PageDriver;
use crate::error::{E2eError, E2eResult};
use crate::pages::LoginSelectors;

pub struct Session {
    suppress_page_errors: bool,
    logged_in: Mutex<HashSet<(String, String)>>,
}

impl Session {
    pub fn new(config: &SuiteConfig) -> Self {
        Self::with_policy(config.suppress_page_errors)
    }

    pub fn with_policy(suppress_page_errors: bool) -> Self {
        Self {
            suppress_page_errors,
            logged_in: Mutex::new(HashSet::new()),
        }
    }

    /// Log in as `username`, skipping the form when these credentials are
    /// already cached. A cache entry is only recorded after the driver
    /// confirms the login route was left.
    pub fn login(
        &self,
        driver: &dyn PageDriver,
        username: &str,
        password: &str,
    ) -> E2eResult<()> {
        let key = (username.to_string(), password.to_string());
        if self.logged_in.lock().contains(&key) {
            debug!(username, "session cache hit, skipping login form");
            return Ok(());
        }

        let selectors = LoginSelectors::default();
        driver.visit("/login")?;
        driver.type_text(selectors.username_input, username)?;
        driver.type_text(selectors.password_input, password)?;
        driver.click(selectors.login_button)?;
        driver.assert_url_not_contains("/login")?;

        self.logged_in.lock().insert(key);
        Ok(())
    }

    /// Drop all cached logins
    pub fn forget(&self) {
        self.logged_in.lock().clear();
    }

    /// Apply the uncaught-page-error policy to an error surfaced by the page
    /// under test.
    pub fn on_page_error(&self, message: &str) -> E2eResult<()> {
        if self.suppress_page_errors {
            warn!(message, "suppressed uncaught page error");
            return Ok(());
        }
        Err(E2eError::PageError(message.to_string()))
    }
}
