//! Session-lifecycle contract of the mock management clients
//!
//! These run everywhere; the clients are pure in-memory bookkeeping.

use ccdesk_common::{AgentStatus, CreateWallboardOptions};
use ccdesk_e2e::clients::uc_outbound::CallDisposition;
use ccdesk_e2e::clients::{
    SupervisorViewManagementClient, UcOutboundManagementClient, WallboardManagementClient,
};
use test_case::test_case;

#[test_case("queue-board" ; "plain name")]
#[test_case("e2e-wb-20260807120000-abcd" ; "generated name")]
#[test_case("board with spaces" ; "name with spaces")]
fn wallboard_sessions_key_by_exact_name(name: &str) {
    let mut client = WallboardManagementClient::new();
    client.create_session(name);
    assert!(client.get_session(name).is_some());
    assert!(client.get_session(&format!("{name}-other")).is_none());
}

#[test]
fn wallboard_session_create_then_get_is_active() {
    let mut client = WallboardManagementClient::new();
    client.create_session("queue-board");

    let session = client.get_session("queue-board").expect("session exists");
    assert!(session.is_active);
    assert!(session.widgets.is_empty());
}

#[test]
fn wallboard_session_end_then_get_reflects_inactive() {
    let mut client = WallboardManagementClient::new();
    client.create_session("queue-board");
    client.end_session("queue-board");

    let session = client.get_session("queue-board").expect("session exists");
    assert!(!session.is_active);
}

#[test]
fn wallboard_options_survive_round_trip() {
    let mut client = WallboardManagementClient::new();
    client.create_session("queue-board");

    let mut options = CreateWallboardOptions::new("queue-board");
    options.skill = Some("billing".to_string());
    client.set_options("queue-board", options);

    let stored = client
        .get_session("queue-board")
        .and_then(|s| s.options.as_ref())
        .expect("options stored");
    assert_eq!(stored.skill.as_deref(), Some("billing"));
}

#[test]
fn cleanup_twice_is_a_no_op_the_second_time() {
    let mut wallboards = WallboardManagementClient::new();
    let mut views = SupervisorViewManagementClient::new();
    let mut outbound = UcOutboundManagementClient::new();

    wallboards.create_session("a");
    views.create_session("b");
    outbound.create_session("c");

    wallboards.cleanup();
    views.cleanup();
    outbound.cleanup();

    // Nothing left; the second sweep must not panic or resurrect anything.
    wallboards.cleanup();
    views.cleanup();
    outbound.cleanup();

    assert!(wallboards.get_session("a").is_none());
    assert!(views.get_session("b").is_none());
    assert!(outbound.get_session("c").is_none());
}

#[test]
fn supervisor_view_session_tracks_expectations() {
    let mut client = SupervisorViewManagementClient::new();
    client.create_session("floor-view");
    client.record_filter("floor-view", "support");
    client.expect_agent_status("floor-view", "agent65", AgentStatus::Ready);

    assert!(client.get_session("floor-view").unwrap().is_active);
    assert_eq!(
        client.expected_status("floor-view", "agent65"),
        Some(AgentStatus::Ready)
    );

    client.end_session("floor-view");
    assert!(!client.get_session("floor-view").unwrap().is_active);
}

#[test]
fn uc_outbound_session_counts_attempts() {
    let mut client = UcOutboundManagementClient::new();
    client.create_session("outbound-run");
    client.record_attempt("outbound-run", "104", "4352551621", CallDisposition::Answered);
    client.record_attempt("outbound-run", "104", "4352551622", CallDisposition::Abandoned);

    let session = client.get_session("outbound-run").expect("session exists");
    assert!(session.is_active);
    assert_eq!(session.attempts.len(), 2);
    assert_eq!(session.attempts_from("104"), 2);
}
