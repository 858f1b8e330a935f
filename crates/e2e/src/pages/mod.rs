//! Page objects: one type per logical screen, a shared capability trait
//!
//! [`PageObject`] is the shared behavior every page exposes (navigate, query,
//! click, type, assert); concrete pages add a fixed selector map and domain
//! actions. Methods return `E2eResult<&Self>` so flows read as fluent chains:
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use webcheck_e2e::pages::{LoginPage, PageObject};
//! # use webcheck_e2e::queue::ScriptedDriver;
//! # fn demo() -> webcheck_e2e::error::E2eResult<()> {
//! let driver = Arc::new(ScriptedDriver::new());
//! let login = LoginPage::new(driver);
//! login.open()?.login("testuser", "password")?.should_be_logged_in()?;
//! # Ok(())
//! # }
//! ```

mod home;
mod login;

pub use home::{HomePage, HomeSelectors};
pub use login::{LoginPage, LoginSelectors};

use std::sync::Arc;

use crate::driver::PageDriver;
use crate::error::E2eResult;

/// Locator for a `data-test` attribute, the selector convention pages rely on
pub fn by_test_id(test_id: &str) -> String {
    format!("[data-test=\"{test_id}\"]")
}

/// Locator for a `data-cy` attribute
pub fn by_cy(id: &str) -> String {
    format!("[data-cy=\"{id}\"]")
}

/// Shared capability set of every page object.
///
/// Concrete pages supply their driver and their own fixed route; all action
/// and assertion helpers are provided and return the page itself for
/// chaining.
pub trait PageObject {
    fn driver(&self) -> &dyn PageDriver;

    /// The route this page lives at, targeted by [`PageObject::open`]
    fn route(&self) -> &str;

    /// Visit this page's own route
    fn open(&self) -> E2eResult<&Self>
    where
        Self: Sized,
    {
        self.driver().visit(self.route())?;
        Ok(self)
    }

    /// Visit an arbitrary url
    fn visit(&self, url: &str) -> E2eResult<&Self>
    where
        Self: Sized,
    {
        self.driver().visit(url)?;
        Ok(self)
    }

    /// Locator for a `data-test` attribute value
    fn get_by_test_id(&self, test_id: &str) -> String {
        by_test_id(test_id)
    }

    /// Locator for a `data-cy` attribute value
    fn get_by_cy(&self, id: &str) -> String {
        by_cy(id)
    }

    fn click(&self, selector: &str) -> E2eResult<&Self>
    where
        Self: Sized,
    {
        self.driver().click(selector)?;
        Ok(self)
    }

    /// Clear the field, then type the text
    fn type_text(&self, selector: &str, text: &str) -> E2eResult<&Self>
    where
        Self: Sized,
    {
        self.driver().type_text(selector, text)?;
        Ok(self)
    }

    fn should_be_visible(&self, selector: &str) -> E2eResult<&Self>
    where
        Self: Sized,
    {
        self.driver().assert_visible(selector)?;
        Ok(self)
    }

    fn should_contain_text(&self, selector: &str, text: &str) -> E2eResult<&Self>
    where
        Self: Sized,
    {
        self.driver().assert_contains_text(selector, text)?;
        Ok(self)
    }

    fn wait_for_element(&self, selector: &str, timeout_ms: u64) -> E2eResult<&Self>
    where
        Self: Sized,
    {
        self.driver().wait_for_element(selector, timeout_ms)?;
        Ok(self)
    }

    fn title(&self) -> E2eResult<String> {
        self.driver().title()
    }

    fn current_url(&self) -> E2eResult<String> {
        self.driver().current_url()
    }

    fn url_should_contain(&self, fragment: &str) -> E2eResult<&Self>
    where
        Self: Sized,
    {
        self.driver().assert_url_contains(fragment)?;
        Ok(self)
    }

    fn wait_for_page_load(&self) -> E2eResult<&Self>
    where
        Self: Sized,
    {
        self.driver().wait_for_page_load()?;
        Ok(self)
    }
}

/// Shared driver handle type used by the concrete pages
pub type DriverHandle = Arc<dyn PageDriver>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_conventions() {
        assert_eq!(by_test_id("login-button"), "[data-test=\"login-button\"]");
        assert_eq!(by_cy("submit"), "[data-cy=\"submit\"]");
    }

    #[test]
    fn convention_lookup_via_trait() {
        let driver = std::sync::Arc::new(crate::queue::ScriptedDriver::new());
        let login = LoginPage::new(driver);
        assert_eq!(login.get_by_test_id("username"), "[data-test=\"username\"]");
        assert_eq!(login.get_by_cy("username"), "[data-cy=\"username\"]");
    }
}
