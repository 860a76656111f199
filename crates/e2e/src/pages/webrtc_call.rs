//! WebRTC agent desktop (`/ccagent`) — status, skills, and the softphone

use std::time::Duration;

use ccdesk_common::{AgentStatus, CallState, SuiteConfig};
use tracing::{debug, warn};

use crate::error::E2eResult;
use crate::page::{to_pass, Page};

const CHANNEL_STATE_CONTAINER: &str = r#"[data-cy="channel-state-container"]"#;
const STATUS_DROPDOWN: &str = r#"[data-cy="agent-status-dropdown"]"#;
const STATUS_LABEL: &str = r#"[data-cy="agent-status-label"]"#;

const SKILLS_PANEL_BUTTON: &str = r#"[data-cy="agent-skills-panel-button"]"#;
const SKILLS_PANEL_CLOSE: &str = r#"[data-cy="agent-skills-panel-close"]"#;

const DIALPAD_BUTTON: &str = r#"[data-cy="softphone-dialpad-button"]"#;
const DIALPAD_NUMBER_INPUT: &str = r#"[data-cy="softphone-number-input"]"#;
const DIALPAD_CALL_BUTTON: &str = r#"[data-cy="softphone-call-button"]"#;

const INCOMING_ACCEPT_BUTTON: &str = r#"[data-cy="incoming-call-accept"]"#;
const END_CALL_BUTTON: &str = r#"[data-cy="end-call-button"]"#;
const WRAPUP_DONE_BUTTON: &str = r#"[data-cy="after-call-work-done-button"]"#;
const CALL_STATE_LABEL: &str = r#"[data-cy="call-state-label"]"#;

/// Window for a routed call to reach the agent desktop.
const CALL_ROUTING_WINDOW: Duration = Duration::from_secs(60);

fn status_option(status: AgentStatus) -> String {
    format!(r#"[data-cy="agent-status-option-{}"]"#, status.label())
}

fn skill_toggle(skill: &str) -> String {
    format!(r#"[data-cy="skill-toggle-{skill}"]"#)
}

pub struct WebRtcCallPage {
    page: Page,
    config: SuiteConfig,
}

impl WebRtcCallPage {
    pub fn new(page: Page, config: &SuiteConfig) -> Self {
        Self {
            page,
            config: config.clone(),
        }
    }

    pub async fn open(&self) -> E2eResult<()> {
        self.page.goto(&self.config.url("/ccagent")).await?;
        self.verify_page_loaded().await
    }

    pub async fn verify_page_loaded(&self) -> E2eResult<()> {
        self.page.expect_visible(CHANNEL_STATE_CONTAINER).await
    }

    /// Status text as shown in the desktop header.
    pub async fn current_status(&self) -> E2eResult<String> {
        let text = self.page.inner_text(STATUS_LABEL).await?;
        Ok(text.trim().to_string())
    }

    /// Pick a status from the dropdown and wait for the label to follow.
    pub async fn set_status(&self, status: AgentStatus) -> E2eResult<()> {
        debug!("[{}] setting status -> {}", self.page.label(), status.label());
        self.page.click(STATUS_DROPDOWN).await?;
        self.page.click(&status_option(status)).await?;

        let page = self.page.clone();
        to_pass(Duration::from_secs(15), Duration::from_millis(500), || {
            let page = page.clone();
            async move { page.expect_text(STATUS_LABEL, status.label()).await }
        })
        .await
    }

    /// Enable or disable one routing skill through the skills panel.
    pub async fn toggle_skill(&self, skill: &str, on: bool) -> E2eResult<()> {
        debug!("[{}] skill {} -> {}", self.page.label(), skill, on);
        self.page.click(SKILLS_PANEL_BUTTON).await?;

        let toggle = skill_toggle(skill);
        if on {
            self.page.check(&toggle).await?;
        } else {
            self.page.uncheck(&toggle).await?;
        }

        // The panel closes itself on some layouts.
        if let Err(e) = self
            .page
            .click_with_timeout(SKILLS_PANEL_CLOSE, Duration::from_secs(3))
            .await
        {
            warn!("[{}] skills panel already closed: {}", self.page.label(), e);
        }
        Ok(())
    }

    /// Dial an outbound number through the softphone dialpad.
    pub async fn dial(&self, number: &str) -> E2eResult<()> {
        debug!("[{}] dialing {}", self.page.label(), number);
        self.page.click(DIALPAD_BUTTON).await?;
        self.page.fill(DIALPAD_NUMBER_INPUT, number).await?;
        self.page.click(DIALPAD_CALL_BUTTON).await?;
        self.verify_call_state(CallState::Ringing).await
    }

    /// Wait for an incoming call toast and accept it.
    pub async fn answer_incoming(&self) -> E2eResult<()> {
        debug!("[{}] waiting for incoming call", self.page.label());
        let window = self.config.poll_window(CALL_ROUTING_WINDOW);

        let page = self.page.clone();
        to_pass(window, Duration::from_millis(500), || {
            let page = page.clone();
            async move { page.expect_visible(INCOMING_ACCEPT_BUTTON).await }
        })
        .await?;

        self.page.click(INCOMING_ACCEPT_BUTTON).await?;
        self.verify_call_state(CallState::Active).await
    }

    /// Hang up and clear after-call work if the tenant has it enabled.
    pub async fn end_call(&self) -> E2eResult<()> {
        debug!("[{}] ending call", self.page.label());
        self.page.click(END_CALL_BUTTON).await?;

        if let Err(e) = self
            .page
            .click_with_timeout(WRAPUP_DONE_BUTTON, Duration::from_secs(5))
            .await
        {
            warn!("[{}] no after-call work step: {}", self.page.label(), e);
        }

        self.verify_call_state(CallState::Idle).await
    }

    /// Poll the softphone's call-state label.
    pub async fn verify_call_state(&self, state: CallState) -> E2eResult<()> {
        let window = self.config.poll_window(CALL_ROUTING_WINDOW);
        let page = self.page.clone();
        to_pass(window, Duration::from_millis(500), || {
            let page = page.clone();
            async move { page.expect_text_contains(CALL_STATE_LABEL, state.label()).await }
        })
        .await
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}
