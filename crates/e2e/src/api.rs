//! API interaction utilities: bounded retry, bulk intercepts, response checks
//!
//! The retry in [`api_request`] is a deliberate simplification: a fixed
//! one-second delay with a decrementing counter, not adaptive or exponential
//! backoff. Only server-error responses (status >= 500) consume retry budget;
//! client errors are returned as-is, and an exhausted budget returns the last
//! failing response instead of raising.

use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

use webcheck_common::value::extract_path;

use crate::driver::{
    EndpointDescriptor, InterceptDriver, Method, RequestDriver, RequestOptions, Response,
};
use crate::error::{E2eError, E2eResult};

/// Fixed delay between retry attempts
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Default retry budget for server-error responses
pub const DEFAULT_RETRIES: u32 = 3;

/// Default timeout for awaiting aliased calls
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Issue a request, retrying up to `retries` times on status >= 500 with a
/// fixed [`RETRY_DELAY`] pause between attempts.
///
/// Non-5xx responses, including 4xx, are never retried. When the budget runs
/// out the last failing response is returned; asserting on its status is the
/// caller's job.
pub fn api_request(
    driver: &dyn RequestDriver,
    method: Method,
    url: &str,
    options: &RequestOptions,
    retries: u32,
) -> E2eResult<Response> {
    let mut attempts_left = retries;
    loop {
        let response = driver.issue_request(method, url, options)?;
        if response.status >= 500 && attempts_left > 0 {
            warn!(
                status = response.status,
                attempts_left, "server error, retrying {} {}", method, url
            );
            driver.pause(RETRY_DELAY);
            attempts_left -= 1;
            continue;
        }
        return Ok(response);
    }
}

/// Register one intercept rule per descriptor, in input order. Descriptors
/// with a canned response short-circuit the real network; the rest only
/// observe. Duplicate aliases silently overwrite.
pub fn setup_api_intercepts(
    driver: &dyn InterceptDriver,
    endpoints: &[EndpointDescriptor],
) -> E2eResult<()> {
    for endpoint in endpoints {
        debug!(alias = %endpoint.alias, url = %endpoint.url, "registering intercept");
        driver.register_intercept(endpoint)?;
    }
    Ok(())
}

/// Await each alias in the given order, sequentially. A slow early alias
/// delays checking of later ones; the first timeout propagates.
pub fn wait_for_apis(
    driver: &dyn InterceptDriver,
    aliases: &[&str],
    timeout_ms: u64,
) -> E2eResult<Vec<Response>> {
    let mut responses = Vec::with_capacity(aliases.len());
    for alias in aliases {
        responses.push(driver.await_intercept(alias, timeout_ms)?);
    }
    Ok(responses)
}

/// Assert the response status equals `expected`.
pub fn verify_response_status(response: &Response, expected: u16) -> E2eResult<()> {
    if response.status != expected {
        return Err(E2eError::AssertionFailed(format!(
            "expected status {expected}, got {}",
            response.status
        )));
    }
    Ok(())
}

/// Assert deep structural equality of the entire body.
pub fn verify_response_body(response: &Response, expected: &Value) -> E2eResult<()> {
    if &response.body != expected {
        return Err(E2eError::AssertionFailed(format!(
            "response body mismatch\nexpected: {}\n  actual: {}",
            serde_json::to_string_pretty(expected).unwrap_or_default(),
            serde_json::to_string_pretty(&response.body).unwrap_or_default(),
        )));
    }
    Ok(())
}

/// Walk the response along a dotted path (`"body.user.id"`, `"status"`),
/// returning `None` on any missing segment instead of failing.
pub fn extract_from_response(response: &Response, path: &str) -> Option<Value> {
    match path.split_once('.') {
        None => match path {
            "status" => Some(json!(response.status)),
            "body" => Some(response.body.clone()),
            _ => None,
        },
        Some(("body", rest)) => extract_path(&response.body, rest).cloned(),
        Some(_) => None,
    }
}
