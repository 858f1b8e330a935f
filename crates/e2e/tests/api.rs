//! API intercept and assertion tests against the scripted driver

use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

use webcheck_e2e::api::{
    extract_from_response, setup_api_intercepts, verify_response_body, verify_response_status,
    wait_for_apis, DEFAULT_WAIT_TIMEOUT_MS,
};
use webcheck_e2e::driver::{CannedResponse, EndpointDescriptor, Method};
use webcheck_e2e::fixtures::ApiFixture;
use webcheck_e2e::pages::{LoginPage, PageObject};
use webcheck_e2e::queue::{Command, ScriptedDriver};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

#[test]
fn mocked_login_api_answers_with_fixture_response() {
    let api = ApiFixture::load(&fixtures_dir()).unwrap();
    let driver = Arc::new(ScriptedDriver::new());
    driver.navigate_on_click("[data-test=\"login-button\"]", "/home");

    setup_api_intercepts(
        driver.as_ref(),
        &[EndpointDescriptor::mock(
            Method::Post,
            api.endpoints.login.clone(),
            "loginApi",
            api.api_responses.success_login.clone(),
        )],
    )
    .unwrap();

    let login = LoginPage::new(driver.clone());
    login
        .open()
        .unwrap()
        .login("testuser", "password")
        .unwrap()
        .should_be_logged_in()
        .unwrap();

    let responses =
        wait_for_apis(driver.as_ref(), &["loginApi"], DEFAULT_WAIT_TIMEOUT_MS).unwrap();
    let response = &responses[0];

    verify_response_status(response, 200).unwrap();
    assert_eq!(extract_from_response(response, "body.success"), Some(json!(true)));
    assert_eq!(
        extract_from_response(response, "body.token"),
        Some(json!("mock-jwt-token"))
    );
    assert_eq!(extract_from_response(response, "body.user.id"), Some(json!(1)));
}

#[test]
fn mocked_failed_login_api() {
    let api = ApiFixture::load(&fixtures_dir()).unwrap();
    let driver = Arc::new(ScriptedDriver::new());

    setup_api_intercepts(
        driver.as_ref(),
        &[EndpointDescriptor::mock(
            Method::Post,
            api.endpoints.login.clone(),
            "loginApi",
            api.api_responses.failed_login.clone(),
        )],
    )
    .unwrap();

    let login = LoginPage::new(driver.clone());
    login
        .open()
        .unwrap()
        .login("invaliduser", "wrongpassword")
        .unwrap();

    let responses =
        wait_for_apis(driver.as_ref(), &["loginApi"], DEFAULT_WAIT_TIMEOUT_MS).unwrap();
    let response = &responses[0];

    verify_response_status(response, 401).unwrap();
    assert_eq!(
        extract_from_response(response, "body.message"),
        Some(json!("Invalid credentials"))
    );
    verify_response_body(
        response,
        &json!({"success": false, "message": "Invalid credentials"}),
    )
    .unwrap();
}

#[test]
fn multiple_endpoints_register_and_complete_in_order() {
    let driver = Arc::new(ScriptedDriver::new());
    let endpoints = vec![
        EndpointDescriptor::observe(Method::Get, "/api/users", "getUsers"),
        EndpointDescriptor::observe(Method::Get, "/api/products", "getProducts"),
        EndpointDescriptor::observe(Method::Get, "/api/orders", "getOrders"),
    ];
    setup_api_intercepts(driver.as_ref(), &endpoints).unwrap();

    let login = LoginPage::new(driver.clone());
    login.visit("/dashboard").unwrap();

    wait_for_apis(
        driver.as_ref(),
        &["getUsers", "getProducts", "getOrders"],
        DEFAULT_WAIT_TIMEOUT_MS,
    )
    .unwrap();

    let awaited: Vec<_> = driver
        .commands()
        .into_iter()
        .filter_map(|c| match c {
            Command::AwaitIntercept { alias, .. } => Some(alias),
            _ => None,
        })
        .collect();
    assert_eq!(awaited, vec!["getUsers", "getProducts", "getOrders"]);
}

#[test]
fn verifies_response_structure_from_observed_call() {
    let driver = Arc::new(ScriptedDriver::new());
    setup_api_intercepts(
        driver.as_ref(),
        &[EndpointDescriptor::mock(
            Method::Get,
            "/api/products",
            "getProducts",
            CannedResponse {
                status_code: 200,
                body: json!({"products": [{"id": 1}, {"id": 2}]}),
            },
        )],
    )
    .unwrap();

    let login = LoginPage::new(driver.clone());
    login.visit("/products").unwrap();

    let responses =
        wait_for_apis(driver.as_ref(), &["getProducts"], DEFAULT_WAIT_TIMEOUT_MS).unwrap();
    let response = &responses[0];

    verify_response_status(response, 200).unwrap();
    let products = extract_from_response(response, "body.products").unwrap();
    assert!(products.is_array());
    assert_eq!(extract_from_response(response, "body.products.0.id"), Some(json!(1)));
    assert_eq!(extract_from_response(response, "body.products.9.id"), None);
}
