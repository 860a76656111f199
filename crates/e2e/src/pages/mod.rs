//! Page objects for the CCDesk UI
//!
//! One module per screen/feature area. Every page object takes a [`Page`]
//! handle, exposes `verify_page_loaded()` as its precondition check, and
//! offers workflow methods that run a fixed UI sequence. Selectors are the
//! `data-cy` contract of the application under test; a markup change there
//! breaks these modules first.
//!
//! [`Page`]: crate::page::Page

pub mod admin_system;
pub mod login;
pub mod loops;
pub mod realtime_displays;
pub mod sip_extensions;
pub mod supervisor_dashboard;
pub mod supervisor_view;
pub mod uc_webphone;
pub mod user_management;
pub mod wallboards;
pub mod webrtc_call;

pub use admin_system::AdminSystemPage;
pub use login::LoginPage;
pub use loops::LoopsManagementPage;
pub use realtime_displays::RealtimeDisplaysPage;
pub use sip_extensions::SipExtensionsPage;
pub use supervisor_dashboard::SupervisorDashboardPage;
pub use supervisor_view::SupervisorViewMetricsPage;
pub use uc_webphone::UcWebphonePage;
pub use user_management::UserManagementPage;
pub use wallboards::WallboardsManagementPage;
pub use webrtc_call::WebRtcCallPage;
