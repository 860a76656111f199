//! Multi-actor call scenario: WebRTC agent, UC webphone caller, supervisor
//!
//! Three browser contexts in one test process. Ordering between actors is
//! program order plus bounded polling on the observing side; there is no
//! parallel execution within the scenario.

mod common;

use ccdesk_common::{AgentStatus, SuiteConfig};
use ccdesk_e2e::clients::uc_outbound::CallDisposition;
use ccdesk_e2e::clients::{SupervisorViewManagementClient, UcOutboundManagementClient};
use ccdesk_e2e::E2eHarness;

const AGENT_NUMBER: u32 = 65;
const AGENT_DISPLAY_NAME: &str = "WebRTC Agent 65";
const UC_AGENT_NUMBER: u32 = 4;
const UC_AGENT_EXTENSION: u32 = 104;
const SKILL: &str = "support";

/// The skill's inbound number that routes to ready agents.
const SKILL_INBOUND_NUMBER: &str = "4352001065";

#[tokio::test]
async fn supervisor_sees_agent_go_busy_during_a_call() {
    if !common::live_gate("supervisor_sees_agent_go_busy_during_a_call") {
        return;
    }

    let config = SuiteConfig::from_env();
    let harness = E2eHarness::launch(config).await.expect("harness");

    let mut view_tracker = SupervisorViewManagementClient::new();
    let mut outbound_tracker = UcOutboundManagementClient::new();

    // Actor 1: the receiving agent, ready on the skill under test.
    let agent = harness
        .login_webrtc_agent(AGENT_NUMBER)
        .await
        .expect("agent login");
    agent.toggle_skill(SKILL, true).await.expect("skill on");
    agent
        .set_status(AgentStatus::Ready)
        .await
        .expect("agent ready");

    // Actor 2: the supervisor watching the realtime view.
    let dashboard = harness.login_supervisor().await.expect("supervisor login");
    let view = dashboard
        .open_supervisor_view()
        .await
        .expect("supervisor view");
    view.filter_by_skill(SKILL).await.expect("filter by skill");

    view_tracker.create_session("call-scenario");
    view_tracker.record_filter("call-scenario", SKILL);
    view_tracker.expect_agent_status("call-scenario", AGENT_DISPLAY_NAME, AgentStatus::Ready);
    view.verify_agent_status(AGENT_DISPLAY_NAME, AgentStatus::Ready)
        .await
        .expect("view shows agent ready");

    // Actor 3: the UC webphone placing the inbound call.
    let webphone = harness
        .login_uc_agent(UC_AGENT_NUMBER, UC_AGENT_EXTENSION)
        .await
        .expect("uc agent login");
    webphone.verify_registered().await.expect("webphone registered");

    outbound_tracker.create_session("call-scenario");
    webphone
        .dial(SKILL_INBOUND_NUMBER)
        .await
        .expect("webphone dials");
    outbound_tracker.record_attempt(
        "call-scenario",
        &UC_AGENT_EXTENSION.to_string(),
        SKILL_INBOUND_NUMBER,
        CallDisposition::Answered,
    );

    // Back to the agent: the call lands and gets answered.
    agent.page().bring_to_front().await.expect("focus agent tab");
    agent.answer_incoming().await.expect("agent answers");

    // The supervisor's dashboard reflects the active call within its window.
    view.page().bring_to_front().await.expect("focus supervisor tab");
    view_tracker.expect_agent_status("call-scenario", AGENT_DISPLAY_NAME, AgentStatus::Busy);
    view.verify_agent_status(AGENT_DISPLAY_NAME, AgentStatus::Busy)
        .await
        .expect("view shows agent busy");

    // Teardown: end the call on both legs, agent drains back to ready.
    agent.page().bring_to_front().await.expect("focus agent tab");
    agent.end_call().await.expect("agent hangs up");
    webphone.hangup().await.expect("webphone hangs up");

    view.page().bring_to_front().await.expect("focus supervisor tab");
    view.verify_agent_status(AGENT_DISPLAY_NAME, AgentStatus::Ready)
        .await
        .expect("view shows agent ready again");

    let tracked = outbound_tracker
        .get_session("call-scenario")
        .expect("outbound session");
    assert_eq!(tracked.attempts_from(&UC_AGENT_EXTENSION.to_string()), 1);

    view_tracker.cleanup();
    outbound_tracker.cleanup();

    harness.shutdown().await.expect("shutdown");
}
