//! Navigation smoke: every admin page object loads right after its
//! navigation method completes

mod common;

use ccdesk_common::SuiteConfig;
use ccdesk_e2e::E2eHarness;

#[tokio::test]
async fn every_admin_page_loads_after_navigation() {
    if !common::live_gate("every_admin_page_loads_after_navigation") {
        return;
    }

    let config = SuiteConfig::from_env();
    let harness = E2eHarness::launch(config).await.expect("harness");

    let dashboard = harness.login_supervisor().await.expect("supervisor login");
    dashboard.verify_page_loaded().await.expect("dashboard");

    // Each open_* method returns a page object whose verify_page_loaded()
    // already passed; calling it again directly must also hold.
    let extensions = dashboard.open_sip_extensions().await.expect("sip extensions");
    extensions.verify_page_loaded().await.expect("sip extensions stable");

    let users = dashboard.open_user_management().await.expect("user management");
    users.verify_page_loaded().await.expect("user management stable");

    let loops = dashboard.open_loops_management().await.expect("loops");
    loops.verify_page_loaded().await.expect("loops stable");

    let wallboards = dashboard
        .open_wallboards_management()
        .await
        .expect("wallboards");
    wallboards.verify_page_loaded().await.expect("wallboards stable");

    let displays = dashboard
        .open_realtime_displays()
        .await
        .expect("realtime displays");
    displays.verify_page_loaded().await.expect("displays stable");
    let titles = displays.active_display_titles().await.expect("titles");
    tracing::info!("{} realtime display(s) active", titles.len());

    let view = dashboard.open_supervisor_view().await.expect("supervisor view");
    view.verify_page_loaded().await.expect("view stable");

    let admin = dashboard.open_admin_system().await.expect("admin system");
    admin.verify_page_loaded().await.expect("admin system stable");

    harness.shutdown().await.expect("shutdown");
}
