//! Status values and heartbeat samples.

use serde::{Deserialize, Deserializer, Serialize};

/// Point-in-time status of a monitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Up,
    Down,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Status {
    /// Returns the lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Up => "up",
            Status::Down => "down",
            Status::Unknown => "unknown",
        }
    }
}

/// Connection status reported for an agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Active,
    Inactive,
    #[default]
    #[serde(other)]
    Unknown,
}

impl AgentStatus {
    /// Returns the lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Active => "active",
            AgentStatus::Inactive => "inactive",
            AgentStatus::Unknown => "unknown",
        }
    }

    /// Map the agent's connection state onto the heartbeat status scale.
    pub fn as_status(&self) -> Status {
        match self {
            AgentStatus::Active => Status::Up,
            AgentStatus::Inactive => Status::Down,
            AgentStatus::Unknown => Status::Unknown,
        }
    }
}

/// A single heartbeat: one observed status, optionally timestamped.
///
/// Decodes from either a bare status string (`"up"`) or an object
/// (`{"status": "up", "timestamp": "2024-05-01T10:00:00Z"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireSample")]
pub struct StatusSample {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl StatusSample {
    /// A sample with no timestamp.
    pub fn new(status: Status) -> Self {
        Self {
            status,
            timestamp: None,
        }
    }

    /// A sample observed at the given RFC 3339 timestamp.
    pub fn at(status: Status, timestamp: impl Into<String>) -> Self {
        Self {
            status,
            timestamp: Some(timestamp.into()),
        }
    }
}

impl From<Status> for StatusSample {
    fn from(status: Status) -> Self {
        Self::new(status)
    }
}

// Object form is tried first: a bare string never matches it.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireSample {
    Full {
        status: Status,
        #[serde(default)]
        timestamp: Option<String>,
    },
    Bare(Status),
}

impl From<WireSample> for StatusSample {
    fn from(wire: WireSample) -> Self {
        match wire {
            WireSample::Full { status, timestamp } => Self { status, timestamp },
            WireSample::Bare(status) => Self::new(status),
        }
    }
}

/// Deserialize a value that may be `null`, falling back to its default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
