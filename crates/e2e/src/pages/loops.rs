//! Loops management screen (wallboard rotation loops)

use std::time::Duration;

use ccdesk_common::{LoopWallboardConfig, SuiteConfig};
use tracing::{debug, info};

use crate::error::{E2eError, E2eResult};
use crate::page::{to_pass, Page};

const LOOPS_TABLE: &str = r#"[data-cy="loops-management-table"]"#;
const NEW_LOOP_BUTTON: &str = r#"[data-cy="loops-new-loop-button"]"#;
const LOOP_NAME_INPUT: &str = r#"[data-cy="loop-editor-name-input"]"#;
const LOOP_SAVE_BUTTON: &str = r#"[data-cy="loop-editor-save-button"]"#;
const DELETE_CONFIRM_BUTTON: &str = r#"[data-cy="confirm-dialog-accept"]"#;

const LOOP_ADD_WALLBOARD_BUTTON: &str = r#"[data-cy="loop-editor-add-wallboard-button"]"#;
const LOOP_WALLBOARD_SELECT: &str = r#"[data-cy="loop-editor-wallboard-select"]"#;
const LOOP_ROTATION_INPUT: &str = r#"[data-cy="loop-editor-rotation-secs-input"]"#;

/// Deleting more rows than this in one sweep means the prefix is wrong.
const CLEANUP_CAP: usize = 50;

fn row(name: &str) -> String {
    format!(r#"[data-cy="loop-row-{name}"]"#)
}

fn rows_with_prefix(prefix: &str) -> String {
    format!(r#"[data-cy^="loop-row-{prefix}"]"#)
}

fn edit_button(name: &str) -> String {
    format!(r#"[data-cy="loop-row-{name}"] [data-cy="loop-edit-button"]"#)
}

fn delete_button(name: &str) -> String {
    format!(r#"[data-cy="loop-row-{name}"] [data-cy="loop-delete-button"]"#)
}

pub struct LoopsManagementPage {
    page: Page,
    config: SuiteConfig,
}

impl LoopsManagementPage {
    pub fn new(page: Page, config: &SuiteConfig) -> Self {
        Self {
            page,
            config: config.clone(),
        }
    }

    pub async fn open(&self) -> E2eResult<()> {
        self.page.goto(&self.config.url("/admin/loops")).await?;
        self.verify_page_loaded().await
    }

    pub async fn verify_page_loaded(&self) -> E2eResult<()> {
        self.page.expect_visible(LOOPS_TABLE).await
    }

    pub async fn create_loop(&self, name: &str) -> E2eResult<()> {
        debug!("[{}] creating loop {}", self.page.label(), name);
        self.page.click(NEW_LOOP_BUTTON).await?;
        self.page.fill(LOOP_NAME_INPUT, name).await?;
        self.page.click(LOOP_SAVE_BUTTON).await?;
        self.verify_loop_exists(name).await
    }

    pub async fn verify_loop_exists(&self, name: &str) -> E2eResult<()> {
        let page = self.page.clone();
        let row_sel = row(name);
        to_pass(Duration::from_secs(15), Duration::from_millis(500), || {
            let page = page.clone();
            let row_sel = row_sel.clone();
            async move { page.expect_visible(&row_sel).await }
        })
        .await
    }

    pub async fn delete_loop(&self, name: &str) -> E2eResult<()> {
        debug!("[{}] deleting loop {}", self.page.label(), name);
        self.page.click(&delete_button(name)).await?;
        self.page.click(DELETE_CONFIRM_BUTTON).await?;
        self.verify_loop_not_exists(name).await
    }

    pub async fn verify_loop_not_exists(&self, name: &str) -> E2eResult<()> {
        let page = self.page.clone();
        let row_sel = row(name);
        to_pass(Duration::from_secs(15), Duration::from_millis(500), || {
            let page = page.clone();
            let row_sel = row_sel.clone();
            async move { page.expect_count(&row_sel, 0).await }
        })
        .await
    }

    /// Delete every loop whose name starts with `prefix`. A sweep over zero
    /// matching rows is a no-op, so running this twice is safe.
    pub async fn cleanup_loops_by_prefix(&self, prefix: &str) -> E2eResult<usize> {
        let rows_sel = rows_with_prefix(prefix);
        let mut removed = 0;

        loop {
            if self.page.count(&rows_sel).await? == 0 {
                break;
            }
            if removed >= CLEANUP_CAP {
                return Err(E2eError::AssertionFailed(format!(
                    "cleanup removed {CLEANUP_CAP} loops matching {prefix:?} and rows keep appearing"
                )));
            }

            let delete_first = format!("{rows_sel} [data-cy=\"loop-delete-button\"]");
            self.page.click(&delete_first).await?;
            self.page.click(DELETE_CONFIRM_BUTTON).await?;
            removed += 1;

            // Let the table settle before recounting.
            tokio::time::sleep(Duration::from_millis(300)).await;
        }

        if removed > 0 {
            info!("[{}] cleaned up {} loop(s) with prefix {}", self.page.label(), removed, prefix);
        }
        Ok(removed)
    }

    /// Attach a wallboard to an existing loop with a rotation interval.
    pub async fn add_wallboard_to_loop(
        &self,
        loop_name: &str,
        wallboard: &LoopWallboardConfig,
    ) -> E2eResult<()> {
        debug!(
            "[{}] adding wallboard {} to loop {}",
            self.page.label(),
            wallboard.wallboard_name,
            loop_name
        );
        self.page.click(&edit_button(loop_name)).await?;
        self.page.click(LOOP_ADD_WALLBOARD_BUTTON).await?;
        self.page
            .select_option(LOOP_WALLBOARD_SELECT, &wallboard.wallboard_name)
            .await?;
        self.page
            .fill(LOOP_ROTATION_INPUT, &wallboard.rotation_secs.to_string())
            .await?;
        self.page.click(LOOP_SAVE_BUTTON).await?;
        self.verify_loop_exists(loop_name).await
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}
