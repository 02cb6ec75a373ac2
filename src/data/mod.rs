//! Data models and processing for status payloads.
//!
//! This module turns fetched monitor/agent records into display-ready data.
//! Everything here is synchronous and free of I/O.
//!
//! ## Submodules
//!
//! - [`grid`]: Heartbeat grid layout ([`GridModel`], [`layout`])
//! - [`palette`]: Status colors as hue + shade ([`Swatch`])
//! - [`format`]: Timestamp, label, uptime and byte formatting
//! - [`entity`]: [`MonitoredEntity`] view over monitors and agents
//! - [`dashboard`]: Dashboard payload and summary counts
//!
//! ## Data Flow
//!
//! ```text
//! Monitor / Agent (wire records)
//!        │
//!        ▼
//! MonitoredEntity::heartbeat()
//!        │
//!        ├──▶ grid::layout(history) ──▶ GridModel (rows of cells)
//!        │
//!        └──▶ uptime (passed through)
//! ```

pub mod dashboard;
pub mod entity;
pub mod format;
pub mod grid;
pub mod palette;

pub use dashboard::{AgentCounts, DashboardData, MonitorCounts};
pub use entity::{HeartbeatGrid, MonitoredEntity};
pub use grid::{
    layout, CellAppearance, GridCell, GridModel, MAX_DISPLAYED_POINTS, MIN_DISPLAYED_POINTS,
    POINTS_PER_ROW,
};
pub use palette::{Hue, Swatch};
