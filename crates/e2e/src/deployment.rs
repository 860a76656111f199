//! Deployment reachability checks
//!
//! The application under test is an external CCDesk deployment; nothing is
//! spawned here. Before a run starts we poll the base URL until it answers,
//! so a dead environment fails fast with a clear error instead of a wall of
//! login timeouts.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::{E2eError, E2eResult};

/// Configuration for the reachability check
#[derive(Debug, Clone)]
pub struct DeploymentConfig {
    /// Base URL of the CCDesk deployment under test
    pub base_url: String,

    /// How long to keep polling before declaring the deployment down
    pub ready_timeout: Duration,

    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            base_url: "https://staging.ccdesk.example.com".to_string(),
            ready_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(5),
        }
    }
}

/// Poll the deployment until it serves the login page.
///
/// Redirects count as healthy: unauthenticated requests to the root are
/// normally bounced to the login route.
pub async fn wait_for_ready(config: &DeploymentConfig) -> E2eResult<()> {
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()?;

    let start = std::time::Instant::now();
    let mut attempts = 0;

    while start.elapsed() < config.ready_timeout {
        attempts += 1;

        match client.get(&config.base_url).send().await {
            Ok(resp) if resp.status().is_success() || resp.status().is_redirection() => {
                info!("Deployment reachable at {}", config.base_url);
                return Ok(());
            }
            Ok(resp) => {
                warn!("Deployment returned {}", resp.status());
            }
            Err(e) => {
                if attempts == 1 {
                    info!("Waiting for {} to answer...", config.base_url);
                }
                if !e.is_connect() && !e.is_timeout() {
                    warn!("Reachability check error: {}", e);
                }
            }
        }

        sleep(Duration::from_millis(500)).await;
    }

    Err(E2eError::DeploymentHealthCheck(attempts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_staging() {
        let config = DeploymentConfig::default();
        assert!(config.base_url.starts_with("https://"));
        assert_eq!(config.ready_timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn unreachable_deployment_fails_with_attempt_count() {
        let config = DeploymentConfig {
            // Reserved TEST-NET-1 address; nothing answers here.
            base_url: "http://192.0.2.1:9".to_string(),
            ready_timeout: Duration::from_secs(1),
            request_timeout: Duration::from_millis(200),
        };
        let err = wait_for_ready(&config).await.unwrap_err();
        assert!(matches!(err, E2eError::DeploymentHealthCheck(n) if n >= 1));
    }
}
