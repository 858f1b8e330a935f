//! Webcheck E2E Harness
//!
//! Page-object browser testing over injected host primitives:
//! - Page objects (login, home) compose a shared capability trait and a
//!   fixed selector map per screen
//! - API utilities layer bounded retry, bulk intercept registration and
//!   response assertions over a network provider
//! - An explicit FIFO command queue makes the host's ordering contract
//!   testable in isolation
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Test code                                                   │
//! │    LoginPage / HomePage ──┐        api_request / wait_for_…  │
//! ├───────────────────────────┼──────────────────────────────────┤
//! │  PageObject trait         │  api utilities                   │
//! │    visit / click / type   │    retry, intercepts, asserts    │
//! ├───────────────────────────┴──────────────────────────────────┤
//! │  Provider traits: PageDriver / RequestDriver / InterceptDriver
//! │    commands issued in strict FIFO order (CommandQueue)       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Backends: PlaywrightDriver (generated Node scripts),        │
//! │            HttpDriver (blocking reqwest),                    │
//! │            ScriptedDriver (fake queue for unit tests)        │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod driver;
pub mod error;
pub mod fixtures;
pub mod http;
pub mod pages;
pub mod playwright;
pub mod queue;
pub mod session;

pub use config::SuiteConfig;
pub use driver::{
    CannedResponse, EndpointDescriptor, InterceptDriver, Method, PageDriver, RequestDriver,
    RequestOptions, Response,
};
pub use error::{E2eError, E2eResult};
pub use pages::{HomePage, LoginPage, PageObject};
pub use queue::{Command, CommandQueue, ScriptedDriver};
pub use session::Session;
