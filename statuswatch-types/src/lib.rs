//! # statuswatch-types
//!
//! Wire types for the status backend consumed by statuswatch. These mirror
//! the JSON payloads served for the dashboard and the public status page.
//!
//! ## Design Goals
//!
//! - **Lenient decoding**: missing or `null` collections decode as empty,
//!   unrecognized status strings decode as [`Status::Unknown`]
//! - **Two history shapes**: a heartbeat may arrive as a bare status string
//!   or as an object carrying a timestamp; both become a [`StatusSample`]
//! - **No computation**: uptime and status are taken as the backend reports them
//!
//! ## Example
//!
//! ```rust
//! use statuswatch_types::{Monitor, Status};
//!
//! let json = r#"{
//!     "id": 1,
//!     "name": "api",
//!     "status": "up",
//!     "uptime": 99.8,
//!     "history": ["up", {"status": "down", "timestamp": "2024-05-01T10:00:00Z"}]
//! }"#;
//!
//! let monitor: Monitor = serde_json::from_str(json).unwrap();
//! assert_eq!(monitor.status, Status::Up);
//! assert_eq!(monitor.history.len(), 2);
//! assert_eq!(monitor.history[1].status, Status::Down);
//! ```

mod entity;
mod response;
mod status;

pub use entity::*;
pub use response::*;
pub use status::*;
