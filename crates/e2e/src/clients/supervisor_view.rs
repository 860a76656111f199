//! Supervisor-view session bookkeeping

use std::collections::HashMap;

use ccdesk_common::AgentStatus;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One tracked supervisor-view session
#[derive(Debug, Clone)]
pub struct SupervisorViewSession {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,

    /// Skill filters applied during the test, in order.
    pub applied_filters: Vec<String>,

    /// Agent statuses the test expects the dashboard to show.
    pub expected_statuses: HashMap<String, AgentStatus>,
}

/// In-test tracker for supervisor-view sessions, keyed by session name.
#[derive(Debug, Default)]
pub struct SupervisorViewManagementClient {
    sessions: HashMap<String, SupervisorViewSession>,
}

impl SupervisorViewManagementClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_session(&mut self, name: &str) -> &mut SupervisorViewSession {
        let session = SupervisorViewSession {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            is_active: true,
            created_at: Utc::now(),
            applied_filters: Vec::new(),
            expected_statuses: HashMap::new(),
        };
        self.sessions.insert(name.to_string(), session);
        self.sessions.get_mut(name).expect("just inserted")
    }

    pub fn get_session(&self, name: &str) -> Option<&SupervisorViewSession> {
        self.sessions.get(name)
    }

    pub fn record_filter(&mut self, name: &str, skill: &str) {
        if let Some(session) = self.sessions.get_mut(name) {
            session.applied_filters.push(skill.to_string());
        }
    }

    /// Record what the dashboard should show for an agent.
    pub fn expect_agent_status(&mut self, name: &str, agent: &str, status: AgentStatus) {
        if let Some(session) = self.sessions.get_mut(name) {
            session.expected_statuses.insert(agent.to_string(), status);
        }
    }

    pub fn expected_status(&self, name: &str, agent: &str) -> Option<AgentStatus> {
        self.sessions
            .get(name)
            .and_then(|s| s.expected_statuses.get(agent))
            .copied()
    }

    pub fn end_session(&mut self, name: &str) {
        if let Some(session) = self.sessions.get_mut(name) {
            session.is_active = false;
        }
    }

    pub fn cleanup(&mut self) {
        self.sessions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_lifecycle() {
        let mut client = SupervisorViewManagementClient::new();
        client.create_session("sv-1");
        assert!(client.get_session("sv-1").unwrap().is_active);

        client.end_session("sv-1");
        assert!(!client.get_session("sv-1").unwrap().is_active);

        client.cleanup();
        assert!(client.get_session("sv-1").is_none());
    }

    #[test]
    fn expected_statuses_are_readable_back() {
        let mut client = SupervisorViewManagementClient::new();
        client.create_session("sv-1");
        client.expect_agent_status("sv-1", "agent65", AgentStatus::Busy);
        assert_eq!(
            client.expected_status("sv-1", "agent65"),
            Some(AgentStatus::Busy)
        );
        assert_eq!(client.expected_status("sv-1", "agent66"), None);
    }

    #[test]
    fn filters_record_in_order() {
        let mut client = SupervisorViewManagementClient::new();
        client.create_session("sv-1");
        client.record_filter("sv-1", "billing");
        client.record_filter("sv-1", "support");
        assert_eq!(
            client.get_session("sv-1").unwrap().applied_filters,
            vec!["billing", "support"]
        );
    }
}
