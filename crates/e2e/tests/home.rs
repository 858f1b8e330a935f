//! Home page tests: session-backed login, navigation and utility data

use std::path::PathBuf;
use std::sync::Arc;

use webcheck_common::strings::{generate_random_email, generate_random_string, DEFAULT_EMAIL_DOMAIN};
use webcheck_common::testdata::{generate_user_data, Record};
use webcheck_e2e::fixtures::UsersFixture;
use webcheck_e2e::pages::{HomePage, PageObject};
use webcheck_e2e::queue::{Command, ScriptedDriver};
use webcheck_e2e::session::Session;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn logged_in_driver(users: &UsersFixture) -> Arc<ScriptedDriver> {
    let driver = Arc::new(ScriptedDriver::new());
    driver.navigate_on_click("[data-test=\"login-button\"]", "/home");
    let session = Session::with_policy(true);
    session
        .login(
            driver.as_ref(),
            &users.valid_user.username,
            &users.valid_user.password,
        )
        .unwrap();
    driver
}

#[test]
fn displays_home_page_after_login() {
    let users = UsersFixture::load(&fixtures_dir()).unwrap();
    let driver = logged_in_driver(&users);

    let home = HomePage::new(driver.clone());
    home.open()
        .unwrap()
        .should_be_displayed()
        .unwrap()
        .should_show_navigation_menu()
        .unwrap();
}

#[test]
fn shows_welcome_message_with_username() {
    let users = UsersFixture::load(&fixtures_dir()).unwrap();
    let driver = logged_in_driver(&users);
    driver.set_text("[data-test=\"welcome-message\"]", "Welcome back, Test!");

    let home = HomePage::new(driver.clone());
    home.open()
        .unwrap()
        .should_show_welcome_message(users.valid_user.first_name.as_deref())
        .unwrap();

    // without a username the check is visibility only
    home.should_show_welcome_message(None).unwrap();
}

#[test]
fn logout_redirects_to_login() {
    let users = UsersFixture::load(&fixtures_dir()).unwrap();
    let driver = logged_in_driver(&users);
    driver.navigate_on_click("[data-test=\"logout-button\"]", "/login");

    let home = HomePage::new(driver.clone());
    home.open()
        .unwrap()
        .logout()
        .unwrap()
        .url_should_contain("/login")
        .unwrap();
}

#[test]
fn navigates_to_sections_by_visible_text() {
    let users = UsersFixture::load(&fixtures_dir()).unwrap();
    let driver = logged_in_driver(&users);

    let sections = ["Dashboard", "Products", "Orders", "Profile"];
    for section in sections {
        driver.navigate_on_click_containing(
            "[data-test=\"nav-menu\"]",
            section,
            &format!("/{}", section.to_lowercase()),
        );
    }

    let home = HomePage::new(driver.clone());
    home.open().unwrap();
    for section in sections {
        home.navigate_to_section(section)
            .unwrap()
            .url_should_contain(&section.to_lowercase())
            .unwrap();
    }

    let clicks: Vec<_> = driver
        .commands()
        .into_iter()
        .filter_map(|c| match c {
            Command::ClickContaining { text, .. } => Some(text),
            _ => None,
        })
        .collect();
    assert_eq!(clicks, sections.map(String::from).to_vec());
}

#[test]
fn clicking_user_profile_reveals_email() {
    let users = UsersFixture::load(&fixtures_dir()).unwrap();
    let driver = logged_in_driver(&users);
    let email = users.valid_user.email.clone().unwrap();
    driver.set_text("[data-test=\"user-profile\"]", &email);

    let home = HomePage::new(driver.clone());
    home.open()
        .unwrap()
        .click_user_profile()
        .unwrap()
        .should_contain_text(home.selectors().user_profile, &email)
        .unwrap();
}

#[test]
fn generates_random_test_data_alongside_page_flow() {
    let random_string = generate_random_string(10);
    let random_email = generate_random_email(DEFAULT_EMAIL_DOMAIN);
    assert_eq!(random_string.len(), 10);
    assert!(random_email.contains("@example.com"));

    let user = generate_user_data(Record::new());
    assert!(user["username"].as_str().unwrap().starts_with("testuser_"));
}
