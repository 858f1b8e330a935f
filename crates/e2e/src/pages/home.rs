//! Home/dashboard page object

use crate::driver::PageDriver;
use crate::error::E2eResult;

use super::{DriverHandle, PageObject};

/// Selector map for the home page. Fixed at construction, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct HomeSelectors {
    pub header: &'static str,
    pub welcome_message: &'static str,
    pub logout_button: &'static str,
    pub main_content: &'static str,
    pub navigation_menu: &'static str,
    pub user_profile: &'static str,
}

impl Default for HomeSelectors {
    fn default() -> Self {
        Self {
            header: "[data-test=\"header\"]",
            welcome_message: "[data-test=\"welcome-message\"]",
            logout_button: "[data-test=\"logout-button\"]",
            main_content: "[data-test=\"main-content\"]",
            navigation_menu: "[data-test=\"nav-menu\"]",
            user_profile: "[data-test=\"user-profile\"]",
        }
    }
}

pub struct HomePage {
    driver: DriverHandle,
    selectors: HomeSelectors,
}

impl PageObject for HomePage {
    fn driver(&self) -> &dyn PageDriver {
        self.driver.as_ref()
    }

    fn route(&self) -> &str {
        "/"
    }
}

impl HomePage {
    pub fn new(driver: DriverHandle) -> Self {
        Self { driver, selectors: HomeSelectors::default() }
    }

    pub fn selectors(&self) -> &HomeSelectors {
        &self.selectors
    }

    pub fn should_be_displayed(&self) -> E2eResult<&Self> {
        self.should_be_visible(self.selectors.header)?
            .should_be_visible(self.selectors.main_content)
    }

    /// Assert the welcome region is visible, and that it names the user when
    /// one is given.
    pub fn should_show_welcome_message(&self, username: Option<&str>) -> E2eResult<&Self> {
        self.should_be_visible(self.selectors.welcome_message)?;
        if let Some(username) = username {
            self.should_contain_text(self.selectors.welcome_message, username)?;
        }
        Ok(self)
    }

    pub fn should_show_navigation_menu(&self) -> E2eResult<&Self> {
        self.should_be_visible(self.selectors.navigation_menu)
    }

    /// Click the menu item with this visible text inside the nav region
    pub fn navigate_to_section(&self, section_name: &str) -> E2eResult<&Self> {
        self.driver()
            .click_containing(self.selectors.navigation_menu, section_name)?;
        Ok(self)
    }

    pub fn logout(&self) -> E2eResult<&Self> {
        self.click(self.selectors.logout_button)
    }

    pub fn click_user_profile(&self) -> E2eResult<&Self> {
        self.click(self.selectors.user_profile)
    }
}
