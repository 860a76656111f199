//! UC webphone tab
//!
//! The unified-communications webphone is a separate web client served under
//! `/webphone`; UC agents take calls there instead of in the agent desktop.

use std::time::Duration;

use ccdesk_common::SuiteConfig;
use tracing::{debug, warn};

use crate::error::E2eResult;
use crate::page::{to_pass, Page};

const WEBPHONE_CONTAINER: &str = r#"[data-cy="webphone-container"]"#;
const REGISTRATION_STATUS: &str = r#"[data-cy="webphone-registration-status"]"#;
const NUMBER_INPUT: &str = r#"[data-cy="webphone-number-input"]"#;
const DIAL_BUTTON: &str = r#"[data-cy="webphone-dial-button"]"#;
const ANSWER_BUTTON: &str = r#"[data-cy="webphone-answer-button"]"#;
const HANGUP_BUTTON: &str = r#"[data-cy="webphone-hangup-button"]"#;

const REGISTRATION_WINDOW: Duration = Duration::from_secs(60);

pub struct UcWebphonePage {
    page: Page,
    config: SuiteConfig,
}

impl UcWebphonePage {
    pub fn new(page: Page, config: &SuiteConfig) -> Self {
        Self {
            page,
            config: config.clone(),
        }
    }

    pub async fn open(&self) -> E2eResult<()> {
        self.page.goto(&self.config.url("/webphone")).await?;
        self.verify_page_loaded().await
    }

    pub async fn verify_page_loaded(&self) -> E2eResult<()> {
        self.page.expect_visible(WEBPHONE_CONTAINER).await
    }

    /// Poll until the webphone's SIP registration shows "Registered".
    pub async fn verify_registered(&self) -> E2eResult<()> {
        let window = self.config.poll_window(REGISTRATION_WINDOW);
        let page = self.page.clone();
        to_pass(window, Duration::from_secs(2), || {
            let page = page.clone();
            async move {
                page.expect_text_contains(REGISTRATION_STATUS, "Registered")
                    .await
            }
        })
        .await
    }

    /// Dial an extension or external number.
    pub async fn dial(&self, number: &str) -> E2eResult<()> {
        debug!("[{}] webphone dialing {}", self.page.label(), number);
        self.page.fill(NUMBER_INPUT, number).await?;
        self.page.click(DIAL_BUTTON).await
    }

    /// Answer the ringing call.
    pub async fn answer(&self) -> E2eResult<()> {
        let page = self.page.clone();
        to_pass(Duration::from_secs(30), Duration::from_millis(500), || {
            let page = page.clone();
            async move { page.expect_visible(ANSWER_BUTTON).await }
        })
        .await?;
        self.page.click(ANSWER_BUTTON).await
    }

    /// Hang up; tolerates the far end having ended the call already.
    pub async fn hangup(&self) -> E2eResult<()> {
        if let Err(e) = self
            .page
            .click_with_timeout(HANGUP_BUTTON, Duration::from_secs(3))
            .await
        {
            warn!("[{}] call already ended: {}", self.page.label(), e);
        }
        Ok(())
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}
