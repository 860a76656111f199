//! Realtime displays screen (launched wallboard/loop instances)

use ccdesk_common::SuiteConfig;
use tracing::debug;

use crate::error::{E2eError, E2eResult};
use crate::page::Page;

const DISPLAYS_CONTAINER: &str = r#"[data-cy="realtime-displays-container"]"#;
const DISPLAY_TITLE: &str = r#"[data-cy="realtime-display-title"]"#;
const DISPLAY_FULLSCREEN_CONTAINER: &str = r#"[data-cy="realtime-display-fullscreen"]"#;

fn launch_button(name: &str) -> String {
    format!(r#"[data-cy="realtime-display-row-{name}"] [data-cy="realtime-display-launch-button"]"#)
}

pub struct RealtimeDisplaysPage {
    page: Page,
    config: SuiteConfig,
}

impl RealtimeDisplaysPage {
    pub fn new(page: Page, config: &SuiteConfig) -> Self {
        Self {
            page,
            config: config.clone(),
        }
    }

    pub async fn open(&self) -> E2eResult<()> {
        self.page.goto(&self.config.url("/realtime-displays")).await?;
        self.verify_page_loaded().await
    }

    pub async fn verify_page_loaded(&self) -> E2eResult<()> {
        self.page.expect_visible(DISPLAYS_CONTAINER).await
    }

    /// Titles of every display currently listed.
    pub async fn active_display_titles(&self) -> E2eResult<Vec<String>> {
        let script = format!(
            "Array.from(document.querySelectorAll('{DISPLAY_TITLE}')).map(el => el.innerText.trim())"
        );
        let value = self.page.evaluate(&script).await?;
        let titles = value
            .as_array()
            .ok_or_else(|| E2eError::Driver("display titles: expected an array".to_string()))?
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect();
        Ok(titles)
    }

    /// Launch a display full screen.
    pub async fn launch_display(&self, name: &str) -> E2eResult<()> {
        debug!("[{}] launching display {}", self.page.label(), name);
        self.page.click(&launch_button(name)).await?;
        self.page.expect_visible(DISPLAY_FULLSCREEN_CONTAINER).await
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}
