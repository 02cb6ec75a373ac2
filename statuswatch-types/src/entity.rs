//! Monitor and agent records as served by the backend.

use serde::{Deserialize, Serialize};

use crate::status::null_as_default;
use crate::{AgentStatus, Status, StatusSample};

/// A monitored HTTP/service endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Monitor {
    pub id: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: Status,

    /// Uptime percentage in `[0, 100]`, computed by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<f64>,

    /// Heartbeats in chronological order, oldest first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<StatusSample>,

    /// Last response time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<String>,
}

/// A registered host reporting resource metrics.
///
/// The dashboard endpoint reports raw `*_total`/`*_used` byte counts while the
/// status page reports percentages; both shapes decode into this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: AgentStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// CPU usage percentage.
    #[serde(default, alias = "cpu_usage", skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,

    /// Memory usage percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<f64>,

    /// Disk usage percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_total: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_used: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_total: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_used: Option<u64>,

    /// Bytes received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_rx: Option<u64>,

    /// Bytes transmitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_tx: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<f64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<StatusSample>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Agent {
    /// Memory usage percentage, derived from byte counts when not reported.
    pub fn memory_percent(&self) -> Option<f64> {
        self.memory.or_else(|| percent_of(self.memory_used?, self.memory_total?))
    }

    /// Disk usage percentage, derived from byte counts when not reported.
    pub fn disk_percent(&self) -> Option<f64> {
        self.disk.or_else(|| percent_of(self.disk_used?, self.disk_total?))
    }

    /// Whether any resource metric has been reported.
    pub fn has_resources(&self) -> bool {
        self.cpu.is_some() && self.memory_percent().is_some()
    }

    /// The agent's heartbeats, or a single sample derived from its current
    /// status when the record carries no history.
    pub fn status_history(&self) -> Vec<StatusSample> {
        if !self.history.is_empty() {
            return self.history.clone();
        }
        vec![StatusSample {
            status: self.status.as_status(),
            timestamp: self.updated_at.clone(),
        }]
    }
}

fn percent_of(used: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(used as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_minimal() {
        let monitor: Monitor = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(monitor.id, 7);
        assert_eq!(monitor.status, Status::Unknown);
        assert!(monitor.history.is_empty());
        assert!(monitor.uptime.is_none());
    }

    #[test]
    fn test_monitor_null_history() {
        let monitor: Monitor =
            serde_json::from_str(r#"{"id": 1, "name": null, "history": null}"#).unwrap();
        assert!(monitor.name.is_empty());
        assert!(monitor.history.is_empty());
    }

    #[test]
    fn test_null_status_is_unknown() {
        let monitor: Monitor = serde_json::from_str(r#"{"id": 1, "status": null}"#).unwrap();
        assert_eq!(monitor.status, Status::Unknown);

        let agent: Agent = serde_json::from_str(r#"{"id": 2, "status": null}"#).unwrap();
        assert_eq!(agent.status, AgentStatus::Unknown);
    }

    #[test]
    fn test_agent_dashboard_shape() {
        let json = r#"{
            "id": 3,
            "name": "web-1",
            "status": "active",
            "cpu_usage": 12.5,
            "memory_total": 2000,
            "memory_used": 500,
            "disk_total": 100,
            "disk_used": 25,
            "updated_at": "2024-05-01T10:00:00Z"
        }"#;
        let agent: Agent = serde_json::from_str(json).unwrap();
        assert_eq!(agent.cpu, Some(12.5));
        assert_eq!(agent.memory_percent(), Some(25.0));
        assert_eq!(agent.disk_percent(), Some(25.0));
        assert!(agent.has_resources());
    }

    #[test]
    fn test_agent_status_page_shape() {
        let json = r#"{"id": 4, "name": "db", "status": "inactive", "cpu": 1.0, "memory": 40.0}"#;
        let agent: Agent = serde_json::from_str(json).unwrap();
        assert_eq!(agent.memory_percent(), Some(40.0));
        assert!(agent.disk_percent().is_none());
    }

    #[test]
    fn test_agent_derived_history() {
        let agent = Agent {
            id: 1,
            status: AgentStatus::Inactive,
            updated_at: Some("2024-05-01T10:00:00Z".to_string()),
            ..Agent::default()
        };
        let history = agent.status_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, Status::Down);
        assert_eq!(history[0].timestamp.as_deref(), Some("2024-05-01T10:00:00Z"));
    }

    #[test]
    fn test_agent_inline_history_preferred() {
        let agent = Agent {
            id: 1,
            status: AgentStatus::Inactive,
            history: vec![StatusSample::new(Status::Up), StatusSample::new(Status::Up)],
            ..Agent::default()
        };
        assert_eq!(agent.status_history().len(), 2);
    }

    #[test]
    fn test_zero_total_has_no_percent() {
        let agent = Agent {
            id: 1,
            memory_total: Some(0),
            memory_used: Some(0),
            ..Agent::default()
        };
        assert!(agent.memory_percent().is_none());
    }
}
