//! UC outbound-call bookkeeping

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Expected disposition of a tracked outbound attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallDisposition {
    Answered,
    Missed,
    Abandoned,
}

/// One outbound call attempt recorded by a test
#[derive(Debug, Clone)]
pub struct OutboundAttempt {
    pub from_extension: String,
    pub dialed: String,
    pub disposition: CallDisposition,
    pub placed_at: DateTime<Utc>,
}

/// One tracked UC outbound session
#[derive(Debug, Clone)]
pub struct UcOutboundSession {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub attempts: Vec<OutboundAttempt>,
}

impl UcOutboundSession {
    pub fn attempts_from(&self, extension: &str) -> usize {
        self.attempts
            .iter()
            .filter(|a| a.from_extension == extension)
            .count()
    }
}

/// In-test tracker for UC outbound calls, keyed by session name.
#[derive(Debug, Default)]
pub struct UcOutboundManagementClient {
    sessions: HashMap<String, UcOutboundSession>,
}

impl UcOutboundManagementClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_session(&mut self, name: &str) -> &mut UcOutboundSession {
        let session = UcOutboundSession {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            is_active: true,
            created_at: Utc::now(),
            attempts: Vec::new(),
        };
        self.sessions.insert(name.to_string(), session);
        self.sessions.get_mut(name).expect("just inserted")
    }

    pub fn get_session(&self, name: &str) -> Option<&UcOutboundSession> {
        self.sessions.get(name)
    }

    /// Record one outbound attempt under a session.
    pub fn record_attempt(
        &mut self,
        name: &str,
        from_extension: &str,
        dialed: &str,
        disposition: CallDisposition,
    ) {
        if let Some(session) = self.sessions.get_mut(name) {
            session.attempts.push(OutboundAttempt {
                from_extension: from_extension.to_string(),
                dialed: dialed.to_string(),
                disposition,
                placed_at: Utc::now(),
            });
        }
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
    fn attempts_count_per_extension() {
        let mut client = UcOutboundManagementClient::new();
        client.create_session("uc-1");
        client.record_attempt("uc-1", "104", "4352551621", CallDisposition::Answered);
        client.record_attempt("uc-1", "104", "4352551622", CallDisposition::Missed);
        client.record_attempt("uc-1", "101", "4352551621", CallDisposition::Answered);

        let session = client.get_session("uc-1").unwrap();
        assert_eq!(session.attempts_from("104"), 2);
        assert_eq!(session.attempts_from("101"), 1);
        assert_eq!(session.attempts_from("999"), 0);
    }

    #[test]
    fn recording_against_unknown_session_is_ignored() {
        let mut client = UcOutboundManagementClient::new();
        client.record_attempt("ghost", "104", "4352551621", CallDisposition::Answered);
        assert!(client.get_session("ghost").is_none());
    }

    #[test]
    fn session_lifecycle() {
        let mut client = UcOutboundManagementClient::new();
        client.create_session("uc-1");
        assert!(client.get_session("uc-1").unwrap().is_active);
        client.end_session("uc-1");
        assert!(!client.get_session("uc-1").unwrap().is_active);
        client.cleanup();
        client.cleanup();
        assert!(client.get_session("uc-1").is_none());
    }
}
