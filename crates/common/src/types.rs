//! Core types for the CCDesk E2E suite

use serde::{Deserialize, Serialize};

/// A username/password pair for one account on the deployment under test.
///
/// The password is kept out of `Debug` output so credentials never leak into
/// test logs or failure reports.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Role under which a browser context logs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Agent,
    Supervisor,
    TestManager,
}

impl Role {
    /// Route the application lands on after a successful login for this role.
    pub fn landing_path(&self) -> &'static str {
        match self {
            Role::Agent => "/ccagent",
            Role::Supervisor => "/supervisor/dashboard",
            Role::TestManager => "/launcher",
        }
    }
}

/// Agent presence status as rendered by the agent desktop and the
/// supervisor view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Ready,
    Busy,
    Lunch,
    Break,
    Offline,
}

impl AgentStatus {
    /// Label as shown in the status dropdown and dashboard tiles.
    pub fn label(&self) -> &'static str {
        match self {
            AgentStatus::Ready => "Ready",
            AgentStatus::Busy => "Busy",
            AgentStatus::Lunch => "Lunch",
            AgentStatus::Break => "Break",
            AgentStatus::Offline => "Offline",
        }
    }
}

impl Default for AgentStatus {
    fn default() -> Self {
        Self::Offline
    }
}

/// Call lifecycle state as surfaced by the softphone UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallState {
    Idle,
    Ringing,
    Active,
    Held,
    Ended,
}

impl CallState {
    pub fn label(&self) -> &'static str {
        match self {
            CallState::Idle => "Idle",
            CallState::Ringing => "Ringing",
            CallState::Active => "Active",
            CallState::Held => "On Hold",
            CallState::Ended => "Ended",
        }
    }
}

/// Parameter bag for creating a wallboard through the management UI.
///
/// Plain options passed into page-object methods; nothing here is persisted
/// by the suite itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWallboardOptions {
    pub name: String,

    /// Template tile to start from on the "new wallboard" screen.
    #[serde(default)]
    pub template: WallboardTemplate,

    /// Skill the wallboard's queue widgets should be scoped to, if any.
    #[serde(default)]
    pub skill: Option<String>,

    /// Save a second time from the preview screen. Some templates only
    /// persist widget layout after the preview save.
    #[serde(default)]
    pub save_from_preview: bool,
}

impl CreateWallboardOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: WallboardTemplate::default(),
            skill: None,
            save_from_preview: false,
        }
    }
}

/// Wallboard starting template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallboardTemplate {
    Blank,
    QueueOverview,
    AgentGrid,
}

impl WallboardTemplate {
    /// Label on the template tile of the "new wallboard" screen.
    pub fn tile_label(&self) -> &'static str {
        match self {
            WallboardTemplate::Blank => "Blank",
            WallboardTemplate::QueueOverview => "Queue Overview",
            WallboardTemplate::AgentGrid => "Agent Grid",
        }
    }
}

impl Default for WallboardTemplate {
    fn default() -> Self {
        Self::Blank
    }
}

/// Configuration for attaching a wallboard to a rotation loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopWallboardConfig {
    pub wallboard_name: String,

    /// Seconds the wallboard stays on screen before the loop rotates.
    pub rotation_secs: u32,
}

impl LoopWallboardConfig {
    pub fn new(wallboard_name: impl Into<String>, rotation_secs: u32) -> Self {
        Self {
            wallboard_name: wallboard_name.into(),
            rotation_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_redacts_password() {
        let creds = Credentials::new("agent65", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("agent65"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn agent_landing_path() {
        assert_eq!(Role::Agent.landing_path(), "/ccagent");
    }

    #[test]
    fn wallboard_options_default_to_blank_template() {
        let opts = CreateWallboardOptions::new("Board A");
        assert_eq!(opts.template, WallboardTemplate::Blank);
        assert!(!opts.save_from_preview);
    }
}
