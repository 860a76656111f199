//! Multi-actor test harness
//!
//! One harness per scenario test: it checks the deployment, launches the
//! Playwright sidecar, and hands out labeled browser contexts for each actor
//! (agent, supervisor, secondary agent, UC webphone tab). Execution within a
//! scenario is single-threaded async/await; actors interleave by program
//! order and explicit `bring_to_front`, never by parallel tasks.

use std::sync::Arc;

use ccdesk_common::{Role, SuiteConfig};
use tracing::info;

use crate::deployment::{self, DeploymentConfig};
use crate::driver::{Browser, DriverConfig, PlaywrightDriver};
use crate::error::E2eResult;
use crate::page::Page;
use crate::pages::{LoginPage, SupervisorDashboardPage, UcWebphonePage, WebRtcCallPage};

pub struct E2eHarness {
    driver: Arc<PlaywrightDriver>,
    config: SuiteConfig,
}

impl E2eHarness {
    /// Check the deployment is up and launch the browser sidecar.
    pub async fn launch(config: SuiteConfig) -> E2eResult<Self> {
        deployment::wait_for_ready(&DeploymentConfig {
            base_url: config.base_url.clone(),
            ..Default::default()
        })
        .await?;

        let driver_config = DriverConfig {
            browser: Browser::Chromium,
            headless: config.headless,
            viewport_width: config.viewport_width,
            viewport_height: config.viewport_height,
            action_timeout: config.action_timeout,
        };
        let driver = Arc::new(PlaywrightDriver::launch(driver_config).await?);

        info!("Harness ready against {}", config.base_url);
        Ok(Self { driver, config })
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Fresh browser context + page for one actor.
    pub async fn new_actor(&self, label: &str) -> E2eResult<Page> {
        let context = self.driver.new_context().await?;
        let page_id = self.driver.new_page(&context).await?;
        info!("Opened context for actor [{}]", label);
        Ok(Page::new(Arc::clone(&self.driver), context, page_id, label))
    }

    /// Close an actor's context (and every tab it owns).
    pub async fn close_actor(&self, page: &Page) -> E2eResult<()> {
        info!("Closing context for actor [{}]", page.label());
        self.driver.close_context(page.context_id()).await
    }

    /// Log in a supervisor in a fresh context.
    pub async fn login_supervisor(&self) -> E2eResult<SupervisorDashboardPage> {
        let page = self.new_actor("supervisor").await?;
        let login = LoginPage::new(page.clone(), &self.config);
        login.open().await?;
        login.login(&self.config.supervisor()?, Role::Supervisor).await?;

        let dashboard = SupervisorDashboardPage::new(page, &self.config);
        dashboard.verify_page_loaded().await?;
        Ok(dashboard)
    }

    /// Log in a numbered WebRTC agent in a fresh context.
    pub async fn login_webrtc_agent(&self, n: u32) -> E2eResult<WebRtcCallPage> {
        let page = self.new_actor(&format!("agent-{n}")).await?;
        let login = LoginPage::new(page.clone(), &self.config);
        login.open().await?;
        login.login(&self.config.webrtc_agent(n)?, Role::Agent).await?;

        let desktop = WebRtcCallPage::new(page, &self.config);
        desktop.verify_page_loaded().await?;
        Ok(desktop)
    }

    /// Log in a UC agent and open their webphone tab.
    pub async fn login_uc_agent(&self, n: u32, ext: u32) -> E2eResult<UcWebphonePage> {
        let page = self.new_actor(&format!("uc-agent-{n}-ext-{ext}")).await?;
        let login = LoginPage::new(page.clone(), &self.config);
        login.open().await?;
        login.login(&self.config.uc_agent(n, ext)?, Role::Agent).await?;

        let webphone = UcWebphonePage::new(page, &self.config);
        webphone.open().await?;
        Ok(webphone)
    }

    /// Shut the sidecar down. Contexts still open die with it.
    pub async fn shutdown(self) -> E2eResult<()> {
        self.driver.shutdown().await
    }
}
