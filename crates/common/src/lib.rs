//! CCDesk E2E Common Library
//!
//! Shared configuration and test-domain types for the CCDesk end-to-end
//! UI suite: environment-sourced credentials, role/status enums, workflow
//! option bags, and unique test-data generation.

pub mod config;
pub mod error;
pub mod testdata;
pub mod types;

// Re-export commonly used types
pub use config::SuiteConfig;
pub use error::{ConfigError, ConfigResult};
pub use testdata::unique_name;
pub use types::*;

/// Suite version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
