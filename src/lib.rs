// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # statuswatch
//!
//! A terminal dashboard and public status page for monitored endpoints and
//! host agents.
//!
//! Monitors and agents are fetched from a status backend (or a JSON file),
//! refreshed on a fixed interval, and drawn as tables with a heartbeat grid
//! per entity.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Application                           │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (state) │    │ (layout) │    │(render) │    │         │  │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘  │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  ┌─────────┐    ┌─────────┐                                  │
//! │  │ poller  │───▶│ source  │◀── ApiClient | FileSource        │
//! │  │ (cycles)│    │ (fetch) │                                  │
//! │  └─────────┘    └─────────┘                                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`poller`]**: [`StatusPoller`] runs refresh cycles on an interval,
//!   cancelling superseded fetches and committing results in start order
//! - **[`source`]**: [`ApiClient`] for the backend HTTP API and
//!   [`FileSource`] for offline JSON
//! - **[`data`]**: Heartbeat grid layout, colors, formatting and summary counts
//! - **[`app`]**: Page state; each page mounts its own poller
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]**: Layered [`Settings`] (file, environment, flags)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a backend
//! statuswatch --endpoint http://localhost:3000
//!
//! # Open the public status page from a file
//! statuswatch --file status.json --page status
//! ```
//!
//! ### Laying out a heartbeat grid
//!
//! ```
//! use statuswatch::data::layout;
//! use statuswatch_types::{Status, StatusSample};
//!
//! let history: Vec<StatusSample> =
//!     [Status::Up, Status::Up, Status::Down].into_iter().map(StatusSample::new).collect();
//!
//! let grid = layout(&history);
//! assert_eq!(grid.row_count(), 1);
//! assert_eq!(grid.sample_count(), 3);
//! assert_eq!(grid.placeholder_count(), 21);
//! ```
//!
//! ### Polling a source
//!
//! ```no_run
//! use std::time::Duration;
//! use statuswatch::{ApiClient, StatusPoller};
//!
//! # tokio_test::block_on(async {
//! let client = ApiClient::builder().endpoint("http://localhost:3000").build().unwrap();
//!
//! let mut poller = StatusPoller::new();
//! poller
//!     .start("status-page", Duration::from_secs(60), move |signal| {
//!         let client = client.clone();
//!         async move { client.status_page(&signal).await }
//!     })
//!     .unwrap();
//!
//! tokio::time::sleep(Duration::from_secs(1)).await;
//! if let Some(page) = poller.snapshot().data {
//!     println!("{}", page.display_title());
//! }
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod poller;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, Page};
pub use config::Settings;
pub use data::{DashboardData, GridModel, HeartbeatGrid, MonitoredEntity};
pub use error::{Error, Result};
pub use poller::{RefreshState, Snapshot, StatusPoller};
pub use source::{ApiClient, FileSource, Source};
