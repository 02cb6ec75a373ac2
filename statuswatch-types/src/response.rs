//! Response envelopes returned by the backend API.
//!
//! Every endpoint wraps its payload as `{ success, <payload>?, message? }`,
//! with the payload field named per endpoint.

use serde::{Deserialize, Serialize};

use crate::status::null_as_default;
use crate::{Agent, Monitor};

/// Title shown when the status page has none configured.
pub const DEFAULT_TITLE: &str = "System Status";

/// Description shown when the status page has none configured.
pub const DEFAULT_DESCRIPTION: &str = "Live system status";

/// Common shape of an API envelope.
pub trait Envelope {
    /// The payload carried on success.
    type Payload;

    /// Split into `(success, payload, message)`.
    fn into_parts(self) -> (bool, Option<Self::Payload>, Option<String>);
}

/// Public status page payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusPageData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub monitors: Vec<Monitor>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub agents: Vec<Agent>,
}

impl StatusPageData {
    /// The configured title, or [`DEFAULT_TITLE`].
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            DEFAULT_TITLE
        } else {
            &self.title
        }
    }

    /// The configured description, or [`DEFAULT_DESCRIPTION`].
    pub fn display_description(&self) -> &str {
        if self.description.trim().is_empty() {
            DEFAULT_DESCRIPTION
        } else {
            &self.description
        }
    }
}

/// `GET /api/status`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusPageResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<StatusPageData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `GET /api/monitors`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorListResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitors: Option<Vec<Monitor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `GET /api/agents`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentListResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents: Option<Vec<Agent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope for StatusPageResponse {
    type Payload = StatusPageData;

    fn into_parts(self) -> (bool, Option<StatusPageData>, Option<String>) {
        (self.success, self.data, self.message)
    }
}

impl Envelope for MonitorListResponse {
    type Payload = Vec<Monitor>;

    fn into_parts(self) -> (bool, Option<Vec<Monitor>>, Option<String>) {
        (self.success, self.monitors, self.message)
    }
}

impl Envelope for AgentListResponse {
    type Payload = Vec<Agent>;

    fn into_parts(self) -> (bool, Option<Vec<Agent>>, Option<String>) {
        (self.success, self.agents, self.message)
    }
}
