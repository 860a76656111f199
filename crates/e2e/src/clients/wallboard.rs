//! Wallboard session bookkeeping

use std::collections::HashMap;

use ccdesk_common::CreateWallboardOptions;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One tracked wallboard session
#[derive(Debug, Clone)]
pub struct WallboardSession {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,

    /// Widgets the test added, in order.
    pub widgets: Vec<String>,

    /// Creation options the test used, kept for later assertions.
    pub options: Option<CreateWallboardOptions>,
}

/// In-test tracker for wallboard sessions, keyed by session name.
#[derive(Debug, Default)]
pub struct WallboardManagementClient {
    sessions: HashMap<String, WallboardSession>,
}

impl WallboardManagementClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or replace) a session under `name`.
    pub fn create_session(&mut self, name: &str) -> &mut WallboardSession {
        let session = WallboardSession {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            is_active: true,
            created_at: Utc::now(),
            widgets: Vec::new(),
            options: None,
        };
        self.sessions.insert(name.to_string(), session);
        self.sessions.get_mut(name).expect("just inserted")
    }

    pub fn get_session(&self, name: &str) -> Option<&WallboardSession> {
        self.sessions.get(name)
    }

    pub fn set_options(&mut self, name: &str, options: CreateWallboardOptions) {
        if let Some(session) = self.sessions.get_mut(name) {
            session.options = Some(options);
        }
    }

    pub fn add_widget(&mut self, name: &str, widget: &str) {
        if let Some(session) = self.sessions.get_mut(name) {
            session.widgets.push(widget.to_string());
        }
    }

    /// Mark a session inactive; the entry stays readable until cleanup.
    pub fn end_session(&mut self, name: &str) {
        if let Some(session) = self.sessions.get_mut(name) {
            session.is_active = false;
        }
    }

    pub fn active_sessions(&self) -> impl Iterator<Item = &WallboardSession> {
        self.sessions.values().filter(|s| s.is_active)
    }

    /// Drop every tracked session. Calling this twice is a no-op the second
    /// time.
    pub fn cleanup(&mut self) {
        self.sessions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_active() {
        let mut client = WallboardManagementClient::new();
        client.create_session("wb-1");
        assert!(client.get_session("wb-1").unwrap().is_active);
    }

    #[test]
    fn end_session_marks_inactive() {
        let mut client = WallboardManagementClient::new();
        client.create_session("wb-1");
        client.end_session("wb-1");
        assert!(!client.get_session("wb-1").unwrap().is_active);
    }

    #[test]
    fn widgets_accumulate_in_order() {
        let mut client = WallboardManagementClient::new();
        client.create_session("wb-1");
        client.add_widget("wb-1", "queue-depth");
        client.add_widget("wb-1", "agent-grid");
        assert_eq!(
            client.get_session("wb-1").unwrap().widgets,
            vec!["queue-depth", "agent-grid"]
        );
    }

    #[test]
    fn unknown_session_is_none() {
        let client = WallboardManagementClient::new();
        assert!(client.get_session("nope").is_none());
    }

    #[test]
    fn cleanup_is_idempotent() {
        let mut client = WallboardManagementClient::new();
        client.create_session("wb-1");
        client.cleanup();
        client.cleanup();
        assert!(client.get_session("wb-1").is_none());
    }
}
