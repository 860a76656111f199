//! Loop and wallboard round-trips through the management UI

mod common;

use ccdesk_common::{
    testdata::{unique_name, SUITE_PREFIX},
    CreateWallboardOptions, LoopWallboardConfig, SuiteConfig, WallboardTemplate,
};
use ccdesk_e2e::clients::WallboardManagementClient;
use ccdesk_e2e::E2eHarness;

/// Create and delete must be inverse operations as observed through the same
/// query methods.
#[tokio::test]
async fn loop_create_delete_round_trip() {
    if !common::live_gate("loop_create_delete_round_trip") {
        return;
    }

    let config = SuiteConfig::from_env();
    let harness = E2eHarness::launch(config).await.expect("harness");

    let dashboard = harness.login_supervisor().await.expect("supervisor login");
    let loops = dashboard.open_loops_management().await.expect("loops page");

    // Strays from crashed runs must not skew this test.
    loops
        .cleanup_loops_by_prefix(SUITE_PREFIX)
        .await
        .expect("pre-test sweep");

    let name = unique_name(&format!("{SUITE_PREFIX}-loop"));
    loops.create_loop(&name).await.expect("create loop");
    loops.verify_loop_exists(&name).await.expect("loop listed");

    loops.delete_loop(&name).await.expect("delete loop");
    loops
        .verify_loop_not_exists(&name)
        .await
        .expect("loop gone");

    harness.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn wallboard_create_attach_to_loop_and_delete() {
    if !common::live_gate("wallboard_create_attach_to_loop_and_delete") {
        return;
    }

    let config = SuiteConfig::from_env();
    let harness = E2eHarness::launch(config).await.expect("harness");

    // Bookkeeping so the final assertions read against what we configured.
    let mut tracker = WallboardManagementClient::new();

    let dashboard = harness.login_supervisor().await.expect("supervisor login");

    let wallboard_name = unique_name(&format!("{SUITE_PREFIX}-wb"));
    let loop_name = unique_name(&format!("{SUITE_PREFIX}-loop"));

    let mut options = CreateWallboardOptions::new(wallboard_name.clone());
    options.template = WallboardTemplate::QueueOverview;
    options.skill = Some("support".to_string());
    options.save_from_preview = true;

    tracker.create_session(&wallboard_name);
    tracker.set_options(&wallboard_name, options.clone());
    tracker.add_widget(&wallboard_name, "queue-depth");

    let wallboards = dashboard
        .open_wallboards_management()
        .await
        .expect("wallboards page");
    wallboards
        .create_wallboard(&options)
        .await
        .expect("create wallboard");

    let loops = dashboard.open_loops_management().await.expect("loops page");
    loops.create_loop(&loop_name).await.expect("create loop");
    loops
        .add_wallboard_to_loop(&loop_name, &LoopWallboardConfig::new(&wallboard_name, 30))
        .await
        .expect("attach wallboard");

    // What we tracked matches what we drove through the UI.
    let session = tracker.get_session(&wallboard_name).expect("tracked session");
    assert!(session.is_active);
    assert_eq!(session.widgets, vec!["queue-depth"]);

    // Tear down in dependency order: loop first, then the wallboard.
    loops.delete_loop(&loop_name).await.expect("delete loop");
    let wallboards = dashboard
        .open_wallboards_management()
        .await
        .expect("wallboards page again");
    wallboards
        .delete_wallboard(&wallboard_name)
        .await
        .expect("delete wallboard");
    wallboards
        .verify_wallboard_not_exists(&wallboard_name)
        .await
        .expect("wallboard gone");

    tracker.end_session(&wallboard_name);
    assert!(!tracker.get_session(&wallboard_name).unwrap().is_active);
    tracker.cleanup();

    harness.shutdown().await.expect("shutdown");
}

/// A cleanup sweep over an already-clean tenant must be a no-op, not an
/// error — tests call it unconditionally in teardown.
#[tokio::test]
async fn cleanup_sweeps_are_idempotent() {
    if !common::live_gate("cleanup_sweeps_are_idempotent") {
        return;
    }

    let config = SuiteConfig::from_env();
    let harness = E2eHarness::launch(config).await.expect("harness");

    let dashboard = harness.login_supervisor().await.expect("supervisor login");

    let loops = dashboard.open_loops_management().await.expect("loops page");
    loops
        .cleanup_loops_by_prefix(SUITE_PREFIX)
        .await
        .expect("first loop sweep");
    let second = loops
        .cleanup_loops_by_prefix(SUITE_PREFIX)
        .await
        .expect("second loop sweep");
    assert_eq!(second, 0, "second sweep should find nothing");

    let wallboards = dashboard
        .open_wallboards_management()
        .await
        .expect("wallboards page");
    wallboards
        .cleanup_wallboards_by_prefix(SUITE_PREFIX)
        .await
        .expect("first wallboard sweep");
    let second = wallboards
        .cleanup_wallboards_by_prefix(SUITE_PREFIX)
        .await
        .expect("second wallboard sweep");
    assert_eq!(second, 0, "second sweep should find nothing");

    harness.shutdown().await.expect("shutdown");
}
