//! Supervisor dashboard and its side-navigation into the admin areas

use std::path::Path;

use ccdesk_common::SuiteConfig;
use tracing::warn;

use crate::error::E2eResult;
use crate::page::Page;
use crate::pages::{
    AdminSystemPage, LoopsManagementPage, RealtimeDisplaysPage, SipExtensionsPage,
    SupervisorViewMetricsPage, UserManagementPage, WallboardsManagementPage,
};

const DASHBOARD_CONTAINER: &str = r#"[data-cy="supervisor-dashboard-container"]"#;
const APP_LOGO: &str = r#"[data-cy="app-logo"]"#;
const SIDENAV_TOGGLE: &str = r#"[data-cy="sidenav-menu-toggle"]"#;

const MENU_SIP_EXTENSIONS: &str = r#"[data-cy="sidenav-menu-sip-extensions"]"#;
const MENU_USER_MANAGEMENT: &str = r#"[data-cy="sidenav-menu-user-management"]"#;
const MENU_LOOPS: &str = r#"[data-cy="sidenav-menu-loops"]"#;
const MENU_WALLBOARDS: &str = r#"[data-cy="sidenav-menu-wallboards"]"#;
const MENU_REALTIME_DISPLAYS: &str = r#"[data-cy="sidenav-menu-realtime-displays"]"#;
const MENU_SUPERVISOR_VIEW: &str = r#"[data-cy="sidenav-menu-supervisor-view"]"#;
const MENU_ADMIN_SYSTEM: &str = r#"[data-cy="sidenav-menu-admin-system"]"#;

pub struct SupervisorDashboardPage {
    page: Page,
    config: SuiteConfig,
}

impl SupervisorDashboardPage {
    pub fn new(page: Page, config: &SuiteConfig) -> Self {
        Self {
            page,
            config: config.clone(),
        }
    }

    pub async fn verify_page_loaded(&self) -> E2eResult<()> {
        self.page.expect_visible(DASHBOARD_CONTAINER).await
    }

    /// Element screenshot of the app logo, for baseline comparison.
    pub async fn capture_logo(&self, path: &Path) -> E2eResult<()> {
        self.page.expect_visible(APP_LOGO).await?;
        self.page.screenshot(path, Some(APP_LOGO), false).await
    }

    pub async fn open_sip_extensions(&self) -> E2eResult<SipExtensionsPage> {
        self.navigate(MENU_SIP_EXTENSIONS, "/admin/sip-extensions").await?;
        let target = SipExtensionsPage::new(self.page.clone(), &self.config);
        target.verify_page_loaded().await?;
        Ok(target)
    }

    pub async fn open_user_management(&self) -> E2eResult<UserManagementPage> {
        self.navigate(MENU_USER_MANAGEMENT, "/agent-license-management").await?;
        let target = UserManagementPage::new(self.page.clone(), &self.config);
        target.verify_page_loaded().await?;
        Ok(target)
    }

    pub async fn open_loops_management(&self) -> E2eResult<LoopsManagementPage> {
        self.navigate(MENU_LOOPS, "/admin/loops").await?;
        let target = LoopsManagementPage::new(self.page.clone(), &self.config);
        target.verify_page_loaded().await?;
        Ok(target)
    }

    pub async fn open_wallboards_management(&self) -> E2eResult<WallboardsManagementPage> {
        self.navigate(MENU_WALLBOARDS, "/admin/wallboards").await?;
        let target = WallboardsManagementPage::new(self.page.clone(), &self.config);
        target.verify_page_loaded().await?;
        Ok(target)
    }

    pub async fn open_realtime_displays(&self) -> E2eResult<RealtimeDisplaysPage> {
        self.navigate(MENU_REALTIME_DISPLAYS, "/realtime-displays").await?;
        let target = RealtimeDisplaysPage::new(self.page.clone(), &self.config);
        target.verify_page_loaded().await?;
        Ok(target)
    }

    pub async fn open_supervisor_view(&self) -> E2eResult<SupervisorViewMetricsPage> {
        self.navigate(MENU_SUPERVISOR_VIEW, "/supervisor/view").await?;
        let target = SupervisorViewMetricsPage::new(self.page.clone(), &self.config);
        target.verify_page_loaded().await?;
        Ok(target)
    }

    pub async fn open_admin_system(&self) -> E2eResult<AdminSystemPage> {
        self.navigate(MENU_ADMIN_SYSTEM, "/admin/system").await?;
        let target = AdminSystemPage::new(self.page.clone(), &self.config);
        target.verify_page_loaded().await?;
        Ok(target)
    }

    /// Menu navigation with a direct-route fallback. Some roles get a trimmed
    /// sidenav; the route itself still works for them.
    async fn navigate(&self, menu_item: &str, route: &str) -> E2eResult<()> {
        let via_menu = async {
            self.page.click(SIDENAV_TOGGLE).await?;
            self.page.click(menu_item).await
        };

        if let Err(e) = via_menu.await {
            warn!(
                "[{}] menu item {} not reachable ({}), navigating to {} directly",
                self.page.label(),
                menu_item,
                e,
                route
            );
            self.page.goto(&self.config.url(route)).await?;
        }
        Ok(())
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}
