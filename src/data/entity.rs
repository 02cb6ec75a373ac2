//! Common view over monitors and agents.

use std::borrow::Cow;

use statuswatch_types::{Agent, Monitor, Status, StatusSample};

use super::format::format_uptime;
use super::grid::{self, GridModel};

/// Anything with a current status, a heartbeat history and an uptime.
///
/// Uptime is always the backend's figure; nothing here computes it.
pub trait MonitoredEntity {
    fn name(&self) -> &str;

    /// Current status on the heartbeat scale.
    fn display_status(&self) -> Status;

    /// Heartbeats in chronological order.
    fn history(&self) -> Cow<'_, [StatusSample]>;

    /// Uptime percentage as reported, `0` when absent.
    fn uptime_percent(&self) -> f64;

    /// Grid layout of this entity's history plus its uptime.
    fn heartbeat(&self) -> HeartbeatGrid {
        HeartbeatGrid::new(&self.history(), self.uptime_percent())
    }
}

impl MonitoredEntity for Monitor {
    fn name(&self) -> &str {
        &self.name
    }

    fn display_status(&self) -> Status {
        self.status
    }

    fn history(&self) -> Cow<'_, [StatusSample]> {
        Cow::Borrowed(&self.history)
    }

    fn uptime_percent(&self) -> f64 {
        self.uptime.unwrap_or(0.0)
    }
}

impl MonitoredEntity for Agent {
    fn name(&self) -> &str {
        &self.name
    }

    fn display_status(&self) -> Status {
        self.status.as_status()
    }

    fn history(&self) -> Cow<'_, [StatusSample]> {
        if self.history.is_empty() {
            Cow::Owned(self.status_history())
        } else {
            Cow::Borrowed(&self.history)
        }
    }

    fn uptime_percent(&self) -> f64 {
        self.uptime.unwrap_or(0.0)
    }
}

/// A laid-out heartbeat grid with the uptime shown beneath it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeartbeatGrid {
    pub grid: GridModel,
    pub uptime: f64,
}

impl HeartbeatGrid {
    pub fn new(history: &[StatusSample], uptime: f64) -> Self {
        Self {
            grid: grid::layout(history),
            uptime,
        }
    }

    /// e.g. `uptime: 99.5%`
    pub fn uptime_label(&self) -> String {
        format!("uptime: {}", format_uptime(self.uptime))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statuswatch_types::AgentStatus;

    #[test]
    fn test_monitor_heartbeat_passes_uptime_through() {
        let monitor = Monitor {
            id: 1,
            name: "api".to_string(),
            status: Status::Down,
            uptime: Some(42.5),
            history: vec![StatusSample::new(Status::Up), StatusSample::new(Status::Down)],
            ..Monitor::default()
        };

        let heartbeat = monitor.heartbeat();
        assert_eq!(heartbeat.uptime, 42.5);
        assert_eq!(heartbeat.uptime_label(), "uptime: 42.5%");
        assert_eq!(heartbeat.grid.sample_count(), 2);
    }

    #[test]
    fn test_agent_without_history_shows_current_status() {
        let agent = Agent {
            id: 2,
            status: AgentStatus::Active,
            ..Agent::default()
        };

        assert_eq!(agent.display_status(), Status::Up);
        let heartbeat = agent.heartbeat();
        assert_eq!(heartbeat.grid.sample_count(), 1);
        assert_eq!(heartbeat.grid.cell(0).and_then(|c| c.status()), Some(Status::Up));
        assert_eq!(heartbeat.uptime, 0.0);
    }
}
