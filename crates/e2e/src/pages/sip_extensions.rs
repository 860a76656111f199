//! SIP extensions admin screen
//!
//! Extension registration is eventually consistent: after an add, the PBX
//! side can take minutes to show "Registered". Every status assertion here
//! polls with a bounded window instead of sleeping.

use std::time::Duration;

use ccdesk_common::SuiteConfig;
use tracing::{debug, warn};

use crate::error::E2eResult;
use crate::page::{to_pass, Page};

const EXTENSIONS_TABLE: &str = r#"[data-cy="sip-extensions-table"]"#;
const ADD_EXTENSION_BUTTON: &str = r#"[data-cy="sip-extension-add-button"]"#;
const ADD_EXTENSION_NUMBER_INPUT: &str = r#"[data-cy="sip-extension-number-input"]"#;
const ADD_EXTENSION_PASSWORD_INPUT: &str = r#"[data-cy="sip-extension-password-input"]"#;
const ADD_EXTENSION_SAVE_BUTTON: &str = r#"[data-cy="sip-extension-save-button"]"#;
const ADD_EXTENSION_CONFIRM_BUTTON: &str = r#"[data-cy="sip-extension-confirm-button"]"#;
const DELETE_CONFIRM_BUTTON: &str = r#"[data-cy="confirm-dialog-accept"]"#;

/// How long a freshly added extension may take to register.
const REGISTRATION_WINDOW: Duration = Duration::from_secs(120);
const REGISTRATION_POLL: Duration = Duration::from_secs(5);

fn row(ext: &str) -> String {
    format!(r#"[data-cy="sip-extension-row-{ext}"]"#)
}

fn status_cell(ext: &str) -> String {
    format!(r#"[data-cy="sip-extension-status-{ext}"]"#)
}

fn delete_button(ext: &str) -> String {
    format!(r#"[data-cy="sip-extension-row-{ext}"] [data-cy="sip-extension-delete-button"]"#)
}

pub struct SipExtensionsPage {
    page: Page,
    config: SuiteConfig,
}

impl SipExtensionsPage {
    pub fn new(page: Page, config: &SuiteConfig) -> Self {
        Self {
            page,
            config: config.clone(),
        }
    }

    pub async fn open(&self) -> E2eResult<()> {
        self.page.goto(&self.config.url("/admin/sip-extensions")).await?;
        self.verify_page_loaded().await
    }

    pub async fn verify_page_loaded(&self) -> E2eResult<()> {
        self.page.expect_visible(EXTENSIONS_TABLE).await
    }

    /// Current status text for an extension ("Registered", "Unreachable", ...).
    pub async fn extension_status(&self, ext: &str) -> E2eResult<String> {
        let text = self.page.inner_text(&status_cell(ext)).await?;
        Ok(text.trim().to_string())
    }

    /// Poll until the extension shows "Registered".
    pub async fn verify_extension_registered(&self, ext: &str) -> E2eResult<()> {
        let window = self.config.poll_window(REGISTRATION_WINDOW);
        debug!("[{}] waiting for extension {} to register", self.page.label(), ext);

        let page = self.page.clone();
        let cell = status_cell(ext);
        to_pass(window, REGISTRATION_POLL, || {
            let page = page.clone();
            let cell = cell.clone();
            async move { page.expect_text(&cell, "Registered").await }
        })
        .await
    }

    pub async fn verify_extension_exists(&self, ext: &str) -> E2eResult<()> {
        self.page.expect_visible(&row(ext)).await
    }

    pub async fn verify_extension_absent(&self, ext: &str) -> E2eResult<()> {
        let page = self.page.clone();
        let row_sel = row(ext);
        to_pass(Duration::from_secs(15), Duration::from_millis(500), || {
            let page = page.clone();
            let row_sel = row_sel.clone();
            async move { page.expect_count(&row_sel, 0).await }
        })
        .await
    }

    /// Remove an extension through the row's delete action.
    pub async fn remove_extension(&self, ext: &str) -> E2eResult<()> {
        debug!("[{}] removing extension {}", self.page.label(), ext);
        self.page.click(&delete_button(ext)).await?;
        self.page.click(DELETE_CONFIRM_BUTTON).await?;
        self.verify_extension_absent(ext).await
    }

    /// Add an extension with a SIP password and wait for the row to appear.
    pub async fn add_extension(&self, ext: &str, password: &str) -> E2eResult<()> {
        debug!("[{}] adding extension {}", self.page.label(), ext);
        self.page.click(ADD_EXTENSION_BUTTON).await?;
        self.page.fill(ADD_EXTENSION_NUMBER_INPUT, ext).await?;
        self.page.fill(ADD_EXTENSION_PASSWORD_INPUT, password).await?;
        self.page.click(ADD_EXTENSION_SAVE_BUTTON).await?;

        // Some tenants show a second confirmation step after save.
        if let Err(e) = self
            .page
            .click_with_timeout(ADD_EXTENSION_CONFIRM_BUTTON, Duration::from_secs(3))
            .await
        {
            warn!("[{}] second save not needed: {}", self.page.label(), e);
        }

        self.verify_extension_exists(ext).await
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}
