//! Wallboards management screen

use std::time::Duration;

use ccdesk_common::{CreateWallboardOptions, SuiteConfig};
use tracing::{debug, info, warn};

use crate::error::{E2eError, E2eResult};
use crate::page::{to_pass, Page};

const WALLBOARDS_GRID: &str = r#"[data-cy="wallboards-management-grid"]"#;
const NEW_WALLBOARD_BUTTON: &str = r#"[data-cy="wallboards-new-button"]"#;
const WALLBOARD_NAME_INPUT: &str = r#"[data-cy="wallboard-editor-name-input"]"#;
const WALLBOARD_SKILL_SELECT: &str = r#"[data-cy="wallboard-editor-skill-select"]"#;
const WALLBOARD_SAVE_BUTTON: &str = r#"[data-cy="wallboard-editor-save-button"]"#;
const PREVIEW_CONTAINER: &str = r#"[data-cy="wallboard-preview-container"]"#;
const PREVIEW_SAVE_BUTTON: &str = r#"[data-cy="wallboard-preview-save-button"]"#;
const PREVIEW_CLOSE_BUTTON: &str = r#"[data-cy="wallboard-preview-close-button"]"#;
const DELETE_CONFIRM_BUTTON: &str = r#"[data-cy="confirm-dialog-accept"]"#;

const CLEANUP_CAP: usize = 50;

fn card(name: &str) -> String {
    format!(r#"[data-cy="wallboard-card-{name}"]"#)
}

fn cards_with_prefix(prefix: &str) -> String {
    format!(r#"[data-cy^="wallboard-card-{prefix}"]"#)
}

fn template_tile(label: &str) -> String {
    format!(r#"[data-cy="wallboard-template-tile-{label}"]"#)
}

fn preview_button(name: &str) -> String {
    format!(r#"[data-cy="wallboard-card-{name}"] [data-cy="wallboard-preview-button"]"#)
}

fn delete_button(name: &str) -> String {
    format!(r#"[data-cy="wallboard-card-{name}"] [data-cy="wallboard-delete-button"]"#)
}

pub struct WallboardsManagementPage {
    page: Page,
    config: SuiteConfig,
}

impl WallboardsManagementPage {
    pub fn new(page: Page, config: &SuiteConfig) -> Self {
        Self {
            page,
            config: config.clone(),
        }
    }

    pub async fn open(&self) -> E2eResult<()> {
        self.page.goto(&self.config.url("/admin/wallboards")).await?;
        self.verify_page_loaded().await
    }

    pub async fn verify_page_loaded(&self) -> E2eResult<()> {
        self.page.expect_visible(WALLBOARDS_GRID).await
    }

    /// Create a wallboard from a template and wait for its card.
    pub async fn create_wallboard(&self, options: &CreateWallboardOptions) -> E2eResult<()> {
        debug!("[{}] creating wallboard {}", self.page.label(), options.name);
        self.page.click(NEW_WALLBOARD_BUTTON).await?;
        self.page
            .click(&template_tile(options.template.tile_label()))
            .await?;
        self.page.fill(WALLBOARD_NAME_INPUT, &options.name).await?;

        if let Some(skill) = &options.skill {
            self.page.select_option(WALLBOARD_SKILL_SELECT, skill).await?;
        }

        self.page.click(WALLBOARD_SAVE_BUTTON).await?;

        if options.save_from_preview {
            // Widget layout for some templates only persists after the
            // preview-screen save.
            self.open_wallboard_preview(&options.name).await?;
            if let Err(e) = self
                .page
                .click_with_timeout(PREVIEW_SAVE_BUTTON, Duration::from_secs(3))
                .await
            {
                warn!("[{}] second save not needed: {}", self.page.label(), e);
            }
            self.page.click(PREVIEW_CLOSE_BUTTON).await?;
        }

        self.verify_wallboard_exists(&options.name).await
    }

    pub async fn verify_wallboard_exists(&self, name: &str) -> E2eResult<()> {
        let page = self.page.clone();
        let card_sel = card(name);
        to_pass(Duration::from_secs(15), Duration::from_millis(500), || {
            let page = page.clone();
            let card_sel = card_sel.clone();
            async move { page.expect_visible(&card_sel).await }
        })
        .await
    }

    pub async fn open_wallboard_preview(&self, name: &str) -> E2eResult<()> {
        self.page.click(&preview_button(name)).await?;
        self.page.expect_visible(PREVIEW_CONTAINER).await
    }

    pub async fn delete_wallboard(&self, name: &str) -> E2eResult<()> {
        debug!("[{}] deleting wallboard {}", self.page.label(), name);
        self.page.click(&delete_button(name)).await?;
        self.page.click(DELETE_CONFIRM_BUTTON).await?;
        self.verify_wallboard_not_exists(name).await
    }

    pub async fn verify_wallboard_not_exists(&self, name: &str) -> E2eResult<()> {
        let page = self.page.clone();
        let card_sel = card(name);
        to_pass(Duration::from_secs(15), Duration::from_millis(500), || {
            let page = page.clone();
            let card_sel = card_sel.clone();
            async move { page.expect_count(&card_sel, 0).await }
        })
        .await
    }

    /// Delete every wallboard whose name starts with `prefix`; safe to run
    /// twice in a row.
    pub async fn cleanup_wallboards_by_prefix(&self, prefix: &str) -> E2eResult<usize> {
        let cards_sel = cards_with_prefix(prefix);
        let mut removed = 0;

        loop {
            if self.page.count(&cards_sel).await? == 0 {
                break;
            }
            if removed >= CLEANUP_CAP {
                return Err(E2eError::AssertionFailed(format!(
                    "cleanup removed {CLEANUP_CAP} wallboards matching {prefix:?} and cards keep appearing"
                )));
            }

            let delete_first = format!("{cards_sel} [data-cy=\"wallboard-delete-button\"]");
            self.page.click(&delete_first).await?;
            self.page.click(DELETE_CONFIRM_BUTTON).await?;
            removed += 1;

            tokio::time::sleep(Duration::from_millis(300)).await;
        }

        if removed > 0 {
            info!(
                "[{}] cleaned up {} wallboard(s) with prefix {}",
                self.page.label(),
                removed,
                prefix
            );
        }
        Ok(removed)
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}
