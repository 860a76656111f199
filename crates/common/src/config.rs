//! Suite configuration sourced from the environment
//!
//! Every deployment parameter the suite needs comes in through environment
//! variables so the same binary can point at any CCDesk environment. Secret
//! material (passwords) is never defaulted; missing variables fail with the
//! exact variable name.

use std::time::Duration;

use tracing::warn;

use crate::error::{ConfigError, ConfigResult};
use crate::types::{Credentials, Role};

/// Base URL of the deployment under test when `DEFAULT_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "https://staging.ccdesk.example.com";

/// Top-level suite configuration
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Base URL of the CCDesk deployment under test
    pub base_url: String,

    /// Run the browser headless
    pub headless: bool,

    /// Viewport dimensions for every context the suite opens
    pub viewport_width: u32,
    pub viewport_height: u32,

    /// Default per-action timeout
    pub action_timeout: Duration,

    /// Multiplier applied to polling windows (slow environments set >1)
    pub timeout_scale: f64,
}

impl SuiteConfig {
    /// Build the configuration from the environment.
    ///
    /// Only non-secret knobs have defaults; credentials are resolved lazily
    /// through the typed accessors so a test only needs the accounts it
    /// actually uses.
    pub fn from_env() -> Self {
        let base_url = std::env::var("DEFAULT_URL")
            .unwrap_or_else(|_| {
                warn!("DEFAULT_URL not set, falling back to {}", DEFAULT_BASE_URL);
                DEFAULT_BASE_URL.to_string()
            })
            .trim_end_matches('/')
            .to_string();

        let headless = std::env::var("CCDESK_E2E_HEADED").map(|v| v != "1").unwrap_or(true);

        let timeout_scale = std::env::var("CCDESK_E2E_TIMEOUT_SCALE")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|s| *s >= 1.0)
            .unwrap_or(1.0);

        Self {
            base_url,
            headless,
            viewport_width: 1280,
            viewport_height: 720,
            action_timeout: Duration::from_secs(15),
            timeout_scale,
        }
    }

    /// Absolute URL for a route path on the deployment under test.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// A polling window scaled for the current environment.
    pub fn poll_window(&self, base: Duration) -> Duration {
        base.mul_f64(self.timeout_scale)
    }

    /// Supervisor account (`SUPERVISOR_USERNAME` / `SUPERVISOR_PASSWORD`)
    pub fn supervisor(&self) -> ConfigResult<Credentials> {
        credentials_from("SUPERVISOR_USERNAME", "SUPERVISOR_PASSWORD")
    }

    /// Test-manager account (`TEST_MANAGER_USERNAME` / `TEST_MANAGER_PASSWORD`)
    pub fn test_manager(&self) -> ConfigResult<Credentials> {
        credentials_from("TEST_MANAGER_USERNAME", "TEST_MANAGER_PASSWORD")
    }

    /// Numbered WebRTC agent account, e.g. agent 65 reads
    /// `WEBRTCAGENT_65_EMAIL` / `WEBRTCAGENT_65_PASSWORD`.
    pub fn webrtc_agent(&self, n: u32) -> ConfigResult<Credentials> {
        credentials_from(
            &format!("WEBRTCAGENT_{n}_EMAIL"),
            &format!("WEBRTCAGENT_{n}_PASSWORD"),
        )
    }

    /// UC agent account keyed by agent number and extension, e.g. agent 4 on
    /// extension 104 reads `UC_AGENT_4_EXT_104_EMAIL` /
    /// `UC_AGENT_4_EXT_104_PASSWORD`.
    pub fn uc_agent(&self, n: u32, ext: u32) -> ConfigResult<Credentials> {
        credentials_from(
            &format!("UC_AGENT_{n}_EXT_{ext}_EMAIL"),
            &format!("UC_AGENT_{n}_EXT_{ext}_PASSWORD"),
        )
    }

    /// Credentials for a role, using the suite's conventional account for
    /// that role (WebRTC agent 65 stands in for "an agent").
    pub fn for_role(&self, role: Role) -> ConfigResult<Credentials> {
        match role {
            Role::Agent => self.webrtc_agent(65),
            Role::Supervisor => self.supervisor(),
            Role::TestManager => self.test_manager(),
        }
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn credentials_from(user_var: &str, pass_var: &str) -> ConfigResult<Credentials> {
    let username = require_var(user_var)?;
    let password = require_var(pass_var)?;
    Ok(Credentials::new(username, password))
}

fn require_var(var: &str) -> ConfigResult<String> {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        Ok(_) => Err(ConfigError::InvalidVar {
            var: var.to_string(),
            reason: "set but empty".to_string(),
        }),
        Err(_) => Err(ConfigError::MissingVar(var.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_route_paths() {
        let config = SuiteConfig {
            base_url: "https://qa.ccdesk.example.com".to_string(),
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            action_timeout: Duration::from_secs(15),
            timeout_scale: 1.0,
        };
        assert_eq!(
            config.url("/ccagent"),
            "https://qa.ccdesk.example.com/ccagent"
        );
        // Absolute URLs pass through untouched
        assert_eq!(config.url("https://other.example.com/x"), "https://other.example.com/x");
    }

    #[test]
    fn poll_window_scales() {
        let mut config = SuiteConfig::from_env();
        config.timeout_scale = 2.0;
        assert_eq!(
            config.poll_window(Duration::from_secs(30)),
            Duration::from_secs(60)
        );
    }

    #[test]
    fn missing_credentials_name_the_variable() {
        std::env::remove_var("WEBRTCAGENT_9999_EMAIL");
        let config = SuiteConfig::from_env();
        let err = config.webrtc_agent(9999).unwrap_err();
        assert!(err.to_string().contains("WEBRTCAGENT_9999_EMAIL"));
    }
}
