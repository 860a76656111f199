//! CCDesk E2E Test Suite
//!
//! This crate drives a real browser against a live CCDesk deployment and
//! asserts on DOM state, navigation, and call-handling behavior surfaced
//! through the UI:
//! - Spawns a persistent Playwright sidecar and talks to it over a
//!   JSON-lines protocol
//! - Wraps each screen of the application in a page object
//! - Orchestrates multi-actor scenarios (agents, supervisor, UC webphone)
//!   across independent browser contexts
//! - Runs declarative YAML smoke specs with visual-regression baselines
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Scenario tests / smoke runner               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  E2eHarness                                                 │
//! │    ├── new_actor(label) -> Page       (one context each)    │
//! │    ├── login_supervisor() -> SupervisorDashboardPage        │
//! │    ├── login_webrtc_agent(n) -> WebRtcCallPage              │
//! │    └── login_uc_agent(n, ext) -> UcWebphonePage             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Page objects (pages::*)     Mock clients (clients::*)      │
//! │    verify_page_loaded()        create_session / verify /    │
//! │    workflow methods            cleanup (in-memory only)     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Page (wrappers + expect_* + to_pass bounded retry)         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PlaywrightDriver  <── JSON lines ──>  node driver.js       │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod clients;
pub mod deployment;
pub mod driver;
pub mod error;
pub mod harness;
pub mod page;
pub mod pages;
pub mod runner;
pub mod spec;
pub mod visual;

pub use error::{E2eError, E2eResult};
pub use harness::E2eHarness;
pub use page::{to_pass, Page};
pub use runner::TestRunner;
pub use spec::{TestSpec, TestStep};
