//! Consolidated login page
//!
//! All roles authenticate through the same form; the application routes to a
//! role-specific landing page afterwards (`/ccagent` for agents, the
//! dashboard for supervisors).

use std::time::Duration;

use ccdesk_common::{Credentials, Role, SuiteConfig};
use tracing::debug;

use crate::error::{E2eError, E2eResult};
use crate::page::{to_pass, Page};

const USERNAME_INPUT: &str = r#"[data-cy="consolidated-login-username-input"]"#;
const PASSWORD_INPUT: &str = r#"[data-cy="consolidated-login-password-input"]"#;
const LOGIN_BUTTON: &str = r#"[data-cy="consolidated-login-login-button"]"#;
const ERROR_BANNER: &str = r#"[data-cy="consolidated-login-error-banner"]"#;
const FORM: &str = r#"[data-cy="consolidated-login-form"]"#;

pub struct LoginPage {
    page: Page,
    base_url: String,
}

impl LoginPage {
    pub fn new(page: Page, config: &SuiteConfig) -> Self {
        Self {
            page,
            base_url: config.base_url.clone(),
        }
    }

    /// Navigate to the login form.
    pub async fn open(&self) -> E2eResult<()> {
        self.page.goto(&self.base_url).await?;
        self.verify_page_loaded().await
    }

    pub async fn verify_page_loaded(&self) -> E2eResult<()> {
        self.page.expect_visible(FORM).await?;
        self.page.expect_visible(USERNAME_INPUT).await
    }

    /// Log in and wait for the role's landing route.
    pub async fn login(&self, credentials: &Credentials, role: Role) -> E2eResult<()> {
        debug!("[{}] logging in as {}", self.page.label(), credentials.username);
        self.page.fill(USERNAME_INPUT, &credentials.username).await?;
        self.page.fill(PASSWORD_INPUT, &credentials.password).await?;
        self.page.click(LOGIN_BUTTON).await?;

        let landing = role.landing_path();
        let page = self.page.clone();
        to_pass(Duration::from_secs(30), Duration::from_millis(500), || {
            let page = page.clone();
            async move { page.expect_url_contains(landing).await }
        })
        .await
    }

    /// Submit bad credentials; the form must survive and show the banner.
    pub async fn login_expecting_failure(&self, credentials: &Credentials) -> E2eResult<String> {
        self.page.fill(USERNAME_INPUT, &credentials.username).await?;
        self.page.fill(PASSWORD_INPUT, &credentials.password).await?;
        self.page.click(LOGIN_BUTTON).await?;

        self.page.expect_visible(ERROR_BANNER).await?;
        self.page.expect_visible(FORM).await?;
        self.error_banner_text().await
    }

    pub async fn error_banner_text(&self) -> E2eResult<String> {
        self.page.inner_text(ERROR_BANNER).await
    }

    /// The login button is disabled until both fields hold text.
    pub async fn is_login_button_enabled(&self) -> E2eResult<bool> {
        self.page.is_enabled(LOGIN_BUTTON).await
    }

    pub async fn expect_login_button_disabled(&self) -> E2eResult<()> {
        if self.is_login_button_enabled().await? {
            return Err(E2eError::AssertionFailed(
                "login button enabled with empty fields".to_string(),
            ));
        }
        Ok(())
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}
