use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tracing::warn;

use crate::app::{App, Page};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // If detail overlay is shown, handle overlay-specific keys
    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            // Walk the heartbeat grid
            KeyCode::Left | KeyCode::Char('h') => app.cursor_prev(),
            KeyCode::Right | KeyCode::Char('l') => app.cursor_next(),
            // Allow scrolling through entities while overlay is open
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Char('r') => app.refresh(),
            _ => {}
        }
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // Page switching
        KeyCode::Tab | KeyCode::BackTab => switch(app, None),
        KeyCode::Char('1') => switch(app, Some(Page::Dashboard)),
        KeyCode::Char('2') => switch(app, Some(Page::StatusPage)),

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Enter detail overlay
        KeyCode::Enter => app.enter_detail(),

        // Go back (Esc and Backspace)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Refresh
        KeyCode::Char('r') => app.refresh(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

/// Switch to `page`, or to the other page when `None`.
fn switch(app: &mut App, page: Option<Page>) {
    let result = match page {
        Some(page) => app.set_page(page),
        None => app.next_page(),
    };

    if let Err(e) = result {
        warn!(error = %e, "Page switch failed");
        app.set_status_message(format!("Switch failed: {}", e));
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        // Scroll wheel
        MouseEventKind::ScrollUp => {
            if app.show_detail_overlay {
                app.cursor_prev();
            } else {
                app.select_prev();
            }
        }
        MouseEventKind::ScrollDown => {
            if app.show_detail_overlay {
                app.cursor_next();
            } else {
                app.select_next();
            }
        }

        // Check for tab clicks (row 1, after header)
        MouseEventKind::Down(MouseButton::Left) if mouse.row == 1 => {
            // Approximate tab positions: Dashboard (0-14), Status Page (15-30)
            if mouse.column < 15 {
                switch(app, Some(Page::Dashboard));
            } else if mouse.column < 31 {
                switch(app, Some(Page::StatusPage));
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}
