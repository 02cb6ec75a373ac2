//! Application state and navigation logic.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::info;

use statuswatch_types::{Agent, Monitor, StatusPageData};

use crate::data::{DashboardData, MonitoredEntity};
use crate::error::{Error, Result};
use crate::poller::{Snapshot, StatusPoller};
use crate::source::Source;
use crate::ui::Theme;

/// The page shown in the TUI.
///
/// Each page owns its own poller; switching pages stops one and starts the
/// other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    /// Summary counts plus monitor and agent tables.
    #[default]
    Dashboard,
    /// The public status page.
    #[serde(rename = "status", alias = "status-page")]
    #[value(name = "status", alias = "status-page")]
    StatusPage,
}

impl Page {
    /// Cycle to the other page.
    pub fn next(self) -> Self {
        match self {
            Page::Dashboard => Page::StatusPage,
            Page::StatusPage => Page::Dashboard,
        }
    }

    /// Returns the display label for this page.
    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::StatusPage => "Status Page",
        }
    }

    /// Name of the query this page polls.
    pub fn query(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::StatusPage => "status-page",
        }
    }
}

/// The mounted page and its poller.
enum ActiveView {
    Dashboard(StatusPoller<DashboardData>),
    StatusPage(StatusPoller<StatusPageData>),
}

impl ActiveView {
    fn mount(page: Page, source: &Source, interval: Duration) -> Result<Self> {
        match page {
            Page::Dashboard => {
                let mut poller = StatusPoller::new();
                let source = source.clone();
                poller.start(page.query(), interval, move |signal| {
                    let source = source.clone();
                    async move { source.dashboard(&signal).await }
                })?;
                Ok(ActiveView::Dashboard(poller))
            }
            Page::StatusPage => {
                let mut poller = StatusPoller::new();
                let source = source.clone();
                poller.start(page.query(), interval, move |signal| {
                    let source = source.clone();
                    async move { source.status_page(&signal).await }
                })?;
                Ok(ActiveView::StatusPage(poller))
            }
        }
    }

    fn page(&self) -> Page {
        match self {
            ActiveView::Dashboard(_) => Page::Dashboard,
            ActiveView::StatusPage(_) => Page::StatusPage,
        }
    }

    fn snapshot(&self) -> PageSnapshot {
        match self {
            ActiveView::Dashboard(poller) => PageSnapshot::from_poller(poller.snapshot(), PageData::Dashboard),
            ActiveView::StatusPage(poller) => PageSnapshot::from_poller(poller.snapshot(), PageData::StatusPage),
        }
    }

    fn refresh_now(&self) {
        match self {
            ActiveView::Dashboard(poller) => poller.refresh_now(),
            ActiveView::StatusPage(poller) => poller.refresh_now(),
        }
    }
}

/// Fetched data for whichever page is mounted.
#[derive(Debug, Clone)]
pub enum PageData {
    Dashboard(Arc<DashboardData>),
    StatusPage(Arc<StatusPageData>),
}

impl PageData {
    pub fn monitors(&self) -> &[Monitor] {
        match self {
            PageData::Dashboard(data) => &data.monitors,
            PageData::StatusPage(data) => &data.monitors,
        }
    }

    pub fn agents(&self) -> &[Agent] {
        match self {
            PageData::Dashboard(data) => &data.agents,
            PageData::StatusPage(data) => &data.agents,
        }
    }

    /// Number of selectable rows: monitors, then agents.
    pub fn entity_count(&self) -> usize {
        self.monitors().len() + self.agents().len()
    }

    /// Row at `index` in monitors-then-agents order.
    pub fn entity(&self, index: usize) -> Option<Selected<'_>> {
        let monitors = self.monitors();
        if index < monitors.len() {
            return Some(Selected::Monitor(&monitors[index]));
        }
        self.agents().get(index - monitors.len()).map(Selected::Agent)
    }
}

/// A selected table row.
#[derive(Debug, Clone, Copy)]
pub enum Selected<'a> {
    Monitor(&'a Monitor),
    Agent(&'a Agent),
}

impl<'a> Selected<'a> {
    pub fn entity(&self) -> &'a dyn MonitoredEntity {
        match *self {
            Selected::Monitor(monitor) => monitor,
            Selected::Agent(agent) => agent,
        }
    }
}

/// One frame's view of the mounted page's poller.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub data: Option<PageData>,
    pub loading: bool,
    pub error: Option<Error>,
    pub updated_at: Option<Instant>,
}

impl PageSnapshot {
    fn from_poller<T>(snapshot: Snapshot<T>, wrap: fn(Arc<T>) -> PageData) -> Self {
        Self {
            data: snapshot.data.map(wrap),
            loading: snapshot.loading,
            error: snapshot.error,
            updated_at: snapshot.updated_at,
        }
    }

    pub fn selected(&self, index: usize) -> Option<Selected<'_>> {
        self.data.as_ref()?.entity(index)
    }

    fn entity_count(&self) -> usize {
        self.data.as_ref().map(PageData::entity_count).unwrap_or(0)
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    source: Source,
    refresh_interval: Duration,
    view: ActiveView,

    // Navigation state
    pub selected_index: usize,
    pub detail_cursor: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create the app and mount `page`. Must be called inside a tokio runtime.
    pub fn new(source: Source, page: Page, refresh_interval: Duration) -> Result<Self> {
        let view = ActiveView::mount(page, &source, refresh_interval)?;

        Ok(Self {
            running: true,
            show_help: false,
            show_detail_overlay: false,
            source,
            refresh_interval,
            view,
            selected_index: 0,
            detail_cursor: 0,
            theme: Theme::dark(),
            status_message: None,
        })
    }

    pub fn page(&self) -> Page {
        self.view.page()
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> String {
        self.source.description()
    }

    /// Current state of the mounted page.
    pub fn snapshot(&self) -> PageSnapshot {
        self.view.snapshot()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Unmount the current page and mount `page`.
    ///
    /// The outgoing poller is stopped before the new one starts.
    pub fn set_page(&mut self, page: Page) -> Result<()> {
        if page == self.page() {
            return Ok(());
        }

        let previous = self.page();
        // Replacing the view drops the old poller, which stops it.
        let view = ActiveView::mount(page, &self.source, self.refresh_interval)?;
        self.view = view;

        self.selected_index = 0;
        self.detail_cursor = 0;
        self.show_detail_overlay = false;

        info!(from = previous.query(), to = page.query(), "Page switched");
        Ok(())
    }

    /// Switch to the other page.
    pub fn next_page(&mut self) -> Result<()> {
        self.set_page(self.page().next())
    }

    /// Start a refresh cycle now.
    pub fn refresh(&mut self) {
        self.view.refresh_now();
        self.set_status_message("Refreshing...".to_string());
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.snapshot().entity_count().saturating_sub(1);
        self.selected_index = (self.selected_index + n).min(max);
        self.reset_detail_cursor();
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
        self.reset_detail_cursor();
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        self.selected_index = 0;
        self.reset_detail_cursor();
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        self.selected_index = self.snapshot().entity_count().saturating_sub(1);
        self.reset_detail_cursor();
    }

    /// Keep the selection inside the current data after a refresh.
    pub fn clamp_selection(&mut self, snapshot: &PageSnapshot) {
        let count = snapshot.entity_count();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }

        let last = snapshot
            .selected(self.selected_index)
            .and_then(|s| s.entity().heartbeat().grid.last_sample_index())
            .unwrap_or(0);
        if self.detail_cursor > last {
            self.detail_cursor = last;
        }
    }

    /// Open the detail overlay for the selected row.
    pub fn enter_detail(&mut self) {
        if self.snapshot().selected(self.selected_index).is_some() {
            self.show_detail_overlay = true;
            self.reset_detail_cursor();
        }
    }

    /// Move the detail cursor one cell left.
    pub fn cursor_prev(&mut self) {
        self.detail_cursor = self.detail_cursor.saturating_sub(1);
    }

    /// Move the detail cursor one cell right, stopping at the latest heartbeat.
    pub fn cursor_next(&mut self) {
        let snapshot = self.snapshot();
        let Some(selected) = snapshot.selected(self.selected_index) else {
            return;
        };
        let max = selected.entity().heartbeat().grid.last_sample_index().unwrap_or(0);
        self.detail_cursor = (self.detail_cursor + 1).min(max);
    }

    /// Put the detail cursor on the most recent heartbeat.
    fn reset_detail_cursor(&mut self) {
        let snapshot = self.snapshot();
        self.detail_cursor = snapshot
            .selected(self.selected_index)
            .and_then(|s| s.entity().heartbeat().grid.last_sample_index())
            .unwrap_or(0);
    }

    /// Navigate back: close help, then the detail overlay.
    pub fn go_back(&mut self) {
        if self.show_help {
            self.show_help = false;
        } else if self.show_detail_overlay {
            self.show_detail_overlay = false;
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    use statuswatch_types::Status;
    use tempfile::NamedTempFile;

    use crate::source::FileSource;

    pub(crate) fn status_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "title": "Acme",
                "monitors": [
                    {{ "id": 1, "name": "api", "status": "up", "uptime": 99.5,
                       "history": ["up", "up", "down"] }},
                    {{ "id": 2, "name": "db", "status": "down", "uptime": 50 }}
                ],
                "agents": [
                    {{ "id": 3, "name": "web-1", "status": "active", "cpu": 12.5 }}
                ]
            }}"#
        )
        .unwrap();
        file.flush().unwrap();
        file
    }

    pub(crate) async fn loaded_app(file: &NamedTempFile, page: Page) -> App {
        let source = Source::File(FileSource::new(file.path()));
        let app = App::new(source, page, Duration::from_secs(60)).unwrap();
        wait_for_data(&app).await;
        app
    }

    pub(crate) async fn wait_for_data(app: &App) {
        for _ in 0..500 {
            if app.snapshot().data.is_some() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("no data loaded");
    }

    #[test]
    fn test_page_cycle() {
        assert_eq!(Page::Dashboard.next(), Page::StatusPage);
        assert_eq!(Page::StatusPage.next(), Page::Dashboard);
        assert_eq!(Page::default(), Page::Dashboard);
    }

    #[tokio::test]
    async fn test_app_loads_dashboard() {
        let file = status_file();
        let app = loaded_app(&file, Page::Dashboard).await;

        let snapshot = app.snapshot();
        assert!(matches!(snapshot.data, Some(PageData::Dashboard(_))));
        assert!(!snapshot.loading);
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.data.unwrap().entity_count(), 3);
    }

    #[tokio::test]
    async fn test_page_switch_remounts() {
        let file = status_file();
        let mut app = loaded_app(&file, Page::Dashboard).await;
        app.select_next();
        app.enter_detail();

        app.next_page().unwrap();
        assert_eq!(app.page(), Page::StatusPage);
        assert_eq!(app.selected_index, 0);
        assert!(!app.show_detail_overlay);

        // Fresh poller: nothing fetched yet for this page.
        assert!(app.snapshot().data.is_none());
        wait_for_data(&app).await;
        assert!(matches!(app.snapshot().data, Some(PageData::StatusPage(_))));
    }

    #[tokio::test]
    async fn test_selection_spans_monitors_then_agents() {
        let file = status_file();
        let mut app = loaded_app(&file, Page::StatusPage).await;

        app.select_last();
        assert_eq!(app.selected_index, 2);
        let snapshot = app.snapshot();
        assert!(matches!(snapshot.selected(2), Some(Selected::Agent(a)) if a.name == "web-1"));

        app.select_next_n(10);
        assert_eq!(app.selected_index, 2);
        app.select_prev_n(10);
        assert_eq!(app.selected_index, 0);
    }

    #[tokio::test]
    async fn test_detail_cursor() {
        let file = status_file();
        let mut app = loaded_app(&file, Page::Dashboard).await;

        app.enter_detail();
        assert!(app.show_detail_overlay);
        // Cursor starts on the latest heartbeat: [up, up, down].
        assert_eq!(app.detail_cursor, 2);

        let snapshot = app.snapshot();
        let grid = snapshot.selected(0).unwrap().entity().heartbeat().grid;
        assert_eq!(grid.cell(app.detail_cursor).and_then(|c| c.status()), Some(Status::Down));

        app.cursor_prev();
        app.cursor_prev();
        app.cursor_prev();
        assert_eq!(app.detail_cursor, 0);

        // Placeholders are not interactive; the cursor stops on the last sample.
        for _ in 0..30 {
            app.cursor_next();
        }
        assert_eq!(app.detail_cursor, 2);
        let snapshot = app.snapshot();
        let grid = snapshot.selected(0).unwrap().entity().heartbeat().grid;
        assert!(!grid.cell(app.detail_cursor).unwrap().is_placeholder());

        app.go_back();
        assert!(!app.show_detail_overlay);
    }

    #[tokio::test]
    async fn test_clamp_keeps_cursor_on_samples() {
        let file = status_file();
        let mut app = loaded_app(&file, Page::Dashboard).await;
        app.enter_detail();

        app.detail_cursor = 20;
        let snapshot = app.snapshot();
        app.clamp_selection(&snapshot);
        assert_eq!(app.detail_cursor, 2);

        // `db` has no history: one placeholder-only grid, cursor pinned to 0.
        app.select_next();
        app.detail_cursor = 5;
        let snapshot = app.snapshot();
        app.clamp_selection(&snapshot);
        assert_eq!(app.detail_cursor, 0);
    }

    #[tokio::test]
    async fn test_missing_file_reports_error() {
        let source = Source::File(FileSource::new("/nonexistent/status.json"));
        let app = App::new(source, Page::Dashboard, Duration::from_secs(60)).unwrap();

        for _ in 0..500 {
            if !app.snapshot().loading {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let snapshot = app.snapshot();
        assert!(matches!(snapshot.error, Some(Error::NetworkFailure(_))));
        assert!(snapshot.data.is_none());
    }
}
