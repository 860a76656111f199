//! Mock management clients
//!
//! In-memory bookkeeping used by the tests themselves to record what they
//! configured, so later assertions can read as "verify business state". No
//! network I/O happens here; the live application's state is only ever
//! observed through the page objects. Sessions are created at test start,
//! mutated by the same test, and discarded via `cleanup()`.

pub mod supervisor_view;
pub mod uc_outbound;
pub mod wallboard;

pub use supervisor_view::SupervisorViewManagementClient;
pub use uc_outbound::UcOutboundManagementClient;
pub use wallboard::WallboardManagementClient;
