//! Dashboard payload and summary counts.

use statuswatch_types::{Agent, AgentStatus, Monitor, Status};

/// Monitors and agents fetched together for the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub monitors: Vec<Monitor>,
    pub agents: Vec<Agent>,
}

/// Monitor counts for the summary card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorCounts {
    pub up: usize,
    pub down: usize,
    pub total: usize,
}

/// Agent counts for the summary card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgentCounts {
    pub active: usize,
    pub inactive: usize,
    pub total: usize,
}

impl MonitorCounts {
    pub fn from_monitors(monitors: &[Monitor]) -> Self {
        Self {
            up: monitors.iter().filter(|m| m.status == Status::Up).count(),
            down: monitors.iter().filter(|m| m.status == Status::Down).count(),
            total: monitors.len(),
        }
    }
}

impl AgentCounts {
    pub fn from_agents(agents: &[Agent]) -> Self {
        Self {
            active: agents.iter().filter(|a| a.status == AgentStatus::Active).count(),
            inactive: agents.iter().filter(|a| a.status == AgentStatus::Inactive).count(),
            total: agents.len(),
        }
    }
}

impl DashboardData {
    pub fn monitor_counts(&self) -> MonitorCounts {
        MonitorCounts::from_monitors(&self.monitors)
    }

    pub fn agent_counts(&self) -> AgentCounts {
        AgentCounts::from_agents(&self.agents)
    }
}
