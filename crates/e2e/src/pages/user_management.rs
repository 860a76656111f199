//! User and license management screen (`/agent-license-management`)

use std::time::Duration;

use ccdesk_common::SuiteConfig;
use tracing::debug;

use crate::error::E2eResult;
use crate::page::{to_pass, Page};

const USERS_TABLE: &str = r#"[data-cy="user-management-table"]"#;
const SEARCH_INPUT: &str = r#"[data-cy="user-management-search-input"]"#;
const LICENSE_SAVE_BUTTON: &str = r#"[data-cy="license-editor-save-button"]"#;

fn user_row(username: &str) -> String {
    format!(r#"[data-cy="user-row-{username}"]"#)
}

fn license_menu(username: &str) -> String {
    format!(r#"[data-cy="user-row-{username}"] [data-cy="license-menu-button"]"#)
}

fn voice_license_checkbox(username: &str) -> String {
    format!(r#"[data-cy="user-row-{username}"] [data-cy="license-voice-checkbox"]"#)
}

fn license_badge(username: &str, license: &str) -> String {
    format!(r#"[data-cy="user-row-{username}"] [data-cy="license-badge-{license}"]"#)
}

pub struct UserManagementPage {
    page: Page,
    config: SuiteConfig,
}

impl UserManagementPage {
    pub fn new(page: Page, config: &SuiteConfig) -> Self {
        Self {
            page,
            config: config.clone(),
        }
    }

    pub async fn open(&self) -> E2eResult<()> {
        self.page
            .goto(&self.config.url("/agent-license-management"))
            .await?;
        self.verify_page_loaded().await
    }

    pub async fn verify_page_loaded(&self) -> E2eResult<()> {
        self.page.expect_visible(USERS_TABLE).await
    }

    /// Filter the table down to one user and wait for their row.
    pub async fn search_user(&self, username: &str) -> E2eResult<()> {
        debug!("[{}] searching for user {}", self.page.label(), username);
        self.page.fill(SEARCH_INPUT, username).await?;

        let page = self.page.clone();
        let row_sel = user_row(username);
        to_pass(Duration::from_secs(15), Duration::from_millis(500), || {
            let page = page.clone();
            let row_sel = row_sel.clone();
            async move { page.expect_visible(&row_sel).await }
        })
        .await
    }

    pub async fn assign_voice_license(&self, username: &str) -> E2eResult<()> {
        debug!("[{}] assigning voice license to {}", self.page.label(), username);
        self.page.click(&license_menu(username)).await?;
        self.page.check(&voice_license_checkbox(username)).await?;
        self.page.click(LICENSE_SAVE_BUTTON).await?;
        self.verify_license_badge(username, "voice").await
    }

    pub async fn unassign_voice_license(&self, username: &str) -> E2eResult<()> {
        debug!("[{}] removing voice license from {}", self.page.label(), username);
        self.page.click(&license_menu(username)).await?;
        self.page.uncheck(&voice_license_checkbox(username)).await?;
        self.page.click(LICENSE_SAVE_BUTTON).await?;

        let page = self.page.clone();
        let badge = license_badge(username, "voice");
        to_pass(Duration::from_secs(15), Duration::from_millis(500), || {
            let page = page.clone();
            let badge = badge.clone();
            async move { page.expect_count(&badge, 0).await }
        })
        .await
    }

    /// The license badge shows up on the row once the grant lands.
    pub async fn verify_license_badge(&self, username: &str, license: &str) -> E2eResult<()> {
        let page = self.page.clone();
        let badge = license_badge(username, license);
        to_pass(Duration::from_secs(15), Duration::from_millis(500), || {
            let page = page.clone();
            let badge = badge.clone();
            async move { page.expect_visible(&badge).await }
        })
        .await
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}
