//! Admin system-settings screen

use std::time::Duration;

use ccdesk_common::SuiteConfig;
use tracing::{debug, warn};

use crate::error::{E2eError, E2eResult};
use crate::page::Page;

const SYSTEM_SETTINGS_CONTAINER: &str = r#"[data-cy="admin-system-settings-container"]"#;
const SAVE_BUTTON: &str = r#"[data-cy="admin-system-save-button"]"#;
const SAVE_CONFIRM_BUTTON: &str = r#"[data-cy="admin-system-save-confirm-button"]"#;

fn toggle(name: &str) -> String {
    format!(r#"[data-cy="system-toggle-{name}"]"#)
}

pub struct AdminSystemPage {
    page: Page,
    config: SuiteConfig,
}

impl AdminSystemPage {
    pub fn new(page: Page, config: &SuiteConfig) -> Self {
        Self {
            page,
            config: config.clone(),
        }
    }

    pub async fn open(&self) -> E2eResult<()> {
        self.page.goto(&self.config.url("/admin/system")).await?;
        self.verify_page_loaded().await
    }

    pub async fn verify_page_loaded(&self) -> E2eResult<()> {
        self.page.expect_visible(SYSTEM_SETTINGS_CONTAINER).await
    }

    /// Current state of a system toggle, read from its `aria-checked`.
    pub async fn system_toggle_state(&self, name: &str) -> E2eResult<bool> {
        let value = self.page.get_attribute(&toggle(name), "aria-checked").await?;
        match value.as_deref() {
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            other => Err(E2eError::AssertionFailed(format!(
                "toggle {name}: unexpected aria-checked {other:?}"
            ))),
        }
    }

    /// Flip a system toggle to the requested state and verify the read-back.
    /// Already-correct toggles are left untouched.
    pub async fn set_system_toggle(&self, name: &str, on: bool) -> E2eResult<()> {
        let current = self.system_toggle_state(name).await?;
        if current == on {
            debug!("[{}] toggle {} already {}", self.page.label(), name, on);
            return Ok(());
        }

        debug!("[{}] setting toggle {} -> {}", self.page.label(), name, on);
        self.page.click(&toggle(name)).await?;
        self.page.click(SAVE_BUTTON).await?;

        // A handful of settings prompt for confirmation before applying.
        if let Err(e) = self
            .page
            .click_with_timeout(SAVE_CONFIRM_BUTTON, Duration::from_secs(3))
            .await
        {
            warn!("[{}] save confirmation not shown: {}", self.page.label(), e);
        }

        let after = self.system_toggle_state(name).await?;
        if after != on {
            return Err(E2eError::AssertionFailed(format!(
                "toggle {name}: expected {on} after save, read back {after}"
            )));
        }
        Ok(())
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}
