//! Direct HTTP request driver backed by a blocking reqwest client

use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::driver::{Method, RequestDriver, RequestOptions, Response};
use crate::error::E2eResult;

const RESPONSE_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpDriver {
    client: reqwest::blocking::Client,
}

impl HttpDriver {
    pub fn new() -> E2eResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(RESPONSE_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

impl RequestDriver for HttpDriver {
    fn issue_request(
        &self,
        method: Method,
        url: &str,
        options: &RequestOptions,
    ) -> E2eResult<Response> {
        let reqwest_method = match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
        };

        let mut request = self.client.request(reqwest_method, url);
        for (name, value) in &options.headers {
            request = request.header(name, value);
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        debug!(%method, url, "issuing request");
        let response = request.send()?;
        let status = response.status().as_u16();
        // any non-JSON body degrades to null rather than failing the call
        let body = response.json::<Value>().unwrap_or(Value::Null);

        Ok(Response::new(status, body))
    }

    fn pause(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
