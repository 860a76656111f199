//! Supervisor view — the realtime agent/skill metrics dashboard
//!
//! Everything on this screen is eventually consistent with the telephony
//! side, so reads are plain scrapes and verifications poll with `to_pass`.

use std::time::Duration;

use ccdesk_common::{AgentStatus, SuiteConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{E2eError, E2eResult};
use crate::page::{to_pass, Page};

const VIEW_CONTAINER: &str = r#"[data-cy="supervisor-view-container"]"#;
const FILTER_BUTTON: &str = r#"[data-cy="supervisor-view-filter-button"]"#;
const FILTER_SKILL_SELECT: &str = r#"[data-cy="supervisor-view-filter-skill-select"]"#;
const FILTER_APPLY_BUTTON: &str = r#"[data-cy="supervisor-view-filter-apply-button"]"#;

/// Window for the dashboard to reflect a status change on the agent side.
const DASHBOARD_SETTLE_WINDOW: Duration = Duration::from_secs(90);

static COUNTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)").expect("counter regex"));

fn agent_tile(name: &str) -> String {
    format!(r#"[data-cy="agent-tile-{name}"]"#)
}

fn agent_tile_status(name: &str) -> String {
    format!(r#"[data-cy="agent-tile-{name}"] [data-cy="agent-tile-status"]"#)
}

fn queue_counter(skill: &str) -> String {
    format!(r#"[data-cy="skill-queue-counter-{skill}"]"#)
}

pub struct SupervisorViewMetricsPage {
    page: Page,
    config: SuiteConfig,
}

impl SupervisorViewMetricsPage {
    pub fn new(page: Page, config: &SuiteConfig) -> Self {
        Self {
            page,
            config: config.clone(),
        }
    }

    pub async fn open(&self) -> E2eResult<()> {
        self.page.goto(&self.config.url("/supervisor/view")).await?;
        self.verify_page_loaded().await
    }

    pub async fn verify_page_loaded(&self) -> E2eResult<()> {
        self.page.expect_visible(VIEW_CONTAINER).await
    }

    /// Scope the dashboard to a single skill.
    pub async fn filter_by_skill(&self, skill: &str) -> E2eResult<()> {
        debug!("[{}] filtering supervisor view by {}", self.page.label(), skill);
        self.page.click(FILTER_BUTTON).await?;
        self.page.select_option(FILTER_SKILL_SELECT, skill).await?;
        self.page.click(FILTER_APPLY_BUTTON).await
    }

    /// Status text on an agent's tile, one scrape, no polling.
    pub async fn agent_status(&self, agent_name: &str) -> E2eResult<String> {
        let text = self.page.inner_text(&agent_tile_status(agent_name)).await?;
        Ok(text.trim().to_string())
    }

    /// Poll until the agent's tile shows the expected status.
    pub async fn verify_agent_status(&self, agent_name: &str, status: AgentStatus) -> E2eResult<()> {
        let window = self.config.poll_window(DASHBOARD_SETTLE_WINDOW);
        debug!(
            "[{}] waiting for {} to show {}",
            self.page.label(),
            agent_name,
            status.label()
        );

        let page = self.page.clone();
        let cell = agent_tile_status(agent_name);
        to_pass(window, Duration::from_secs(2), || {
            let page = page.clone();
            let cell = cell.clone();
            async move { page.expect_text_contains(&cell, status.label()).await }
        })
        .await
    }

    pub async fn verify_agent_visible(&self, agent_name: &str) -> E2eResult<()> {
        self.page.expect_visible(&agent_tile(agent_name)).await
    }

    /// Queue depth for a skill, parsed out of its counter widget
    /// ("Calls in queue: 4" -> 4).
    pub async fn calls_in_queue(&self, skill: &str) -> E2eResult<u32> {
        let text = self.page.inner_text(&queue_counter(skill)).await?;
        let captures = COUNTER_RE
            .captures(&text)
            .ok_or_else(|| E2eError::AssertionFailed(format!(
                "queue counter for {skill}: no number in {text:?}"
            )))?;
        captures[1]
            .parse::<u32>()
            .map_err(|e| E2eError::AssertionFailed(format!("queue counter for {skill}: {e}")))
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}
