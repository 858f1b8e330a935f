//! Login page object

use crate::driver::PageDriver;
use crate::error::E2eResult;

use super::{DriverHandle, PageObject};

/// Selector map for the login page. Fixed at construction, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct LoginSelectors {
    pub username_input: &'static str,
    pub password_input: &'static str,
    pub login_button: &'static str,
    pub error_message: &'static str,
    pub login_form: &'static str,
}

impl Default for LoginSelectors {
    fn default() -> Self {
        Self {
            username_input: "[data-test=\"username\"]",
            password_input: "[data-test=\"password\"]",
            login_button: "[data-test=\"login-button\"]",
            error_message: "[data-test=\"error-message\"]",
            login_form: "[data-test=\"login-form\"]",
        }
    }
}

pub struct LoginPage {
    driver: DriverHandle,
    selectors: LoginSelectors,
}

impl PageObject for LoginPage {
    fn driver(&self) -> &dyn PageDriver {
        self.driver.as_ref()
    }

    fn route(&self) -> &str {
        "/login"
    }
}

impl LoginPage {
    pub fn new(driver: DriverHandle) -> Self {
        Self { driver, selectors: LoginSelectors::default() }
    }

    pub fn selectors(&self) -> &LoginSelectors {
        &self.selectors
    }

    pub fn enter_username(&self, username: &str) -> E2eResult<&Self> {
        self.type_text(self.selectors.username_input, username)
    }

    pub fn enter_password(&self, password: &str) -> E2eResult<&Self> {
        self.type_text(self.selectors.password_input, password)
    }

    pub fn click_login_button(&self) -> E2eResult<&Self> {
        self.click(self.selectors.login_button)
    }

    /// Enter both credentials and submit, as one composed action
    pub fn login(&self, username: &str, password: &str) -> E2eResult<&Self> {
        self.enter_username(username)?
            .enter_password(password)?
            .click_login_button()
    }

    /// Successful login leaves the login route behind
    pub fn should_be_logged_in(&self) -> E2eResult<&Self> {
        self.driver().assert_url_not_contains("/login")?;
        Ok(self)
    }

    pub fn should_show_error(&self, message: &str) -> E2eResult<&Self> {
        self.should_be_visible(self.selectors.error_message)?
            .should_contain_text(self.selectors.error_message, message)
    }

    pub fn should_show_login_form(&self) -> E2eResult<&Self> {
        self.should_be_visible(self.selectors.login_form)
    }
}
