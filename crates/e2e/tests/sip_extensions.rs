//! SIP extension lifecycle through the admin UI
//!
//! Mirrors the canonical registration scenario: extension "111" is expected
//! to exist and be registered in the test tenant, gets removed, re-added
//! with its SIP password, and must come back registered — without disturbing
//! "101" on the same PBX.

mod common;

use ccdesk_common::SuiteConfig;
use ccdesk_e2e::E2eHarness;

const EXTENSION: &str = "111";
const NEIGHBOR_EXTENSION: &str = "101";
const EXTENSION_SIP_PASSWORD_VAR: &str = "SIP_EXT_111_PASSWORD";

#[tokio::test]
async fn extension_remove_and_readd_returns_to_registered() {
    if !common::live_gate("extension_remove_and_readd_returns_to_registered") {
        return;
    }

    let sip_password = std::env::var(EXTENSION_SIP_PASSWORD_VAR)
        .unwrap_or_else(|_| panic!("{EXTENSION_SIP_PASSWORD_VAR} must be set for this scenario"));

    let config = SuiteConfig::from_env();
    let harness = E2eHarness::launch(config).await.expect("harness");

    let dashboard = harness.login_supervisor().await.expect("supervisor login");
    let extensions = dashboard
        .open_sip_extensions()
        .await
        .expect("sip extensions page");

    // Precondition: both extensions registered before we touch anything.
    extensions
        .verify_extension_registered(EXTENSION)
        .await
        .expect("111 registered at start");
    extensions
        .verify_extension_registered(NEIGHBOR_EXTENSION)
        .await
        .expect("101 registered at start");

    extensions
        .remove_extension(EXTENSION)
        .await
        .expect("remove 111");
    extensions
        .verify_extension_absent(EXTENSION)
        .await
        .expect("111 gone after removal");

    extensions
        .add_extension(EXTENSION, &sip_password)
        .await
        .expect("re-add 111");

    // Registration settles on the PBX side; both rows must end registered.
    extensions
        .verify_extension_registered(EXTENSION)
        .await
        .expect("111 registered again");
    extensions
        .verify_extension_registered(NEIGHBOR_EXTENSION)
        .await
        .expect("101 still registered");

    harness.shutdown().await.expect("shutdown");
}
