//! Application state for the TUI

use std::time::Instant;

use crate::controller::AnalysisFormController;
use crate::render::ResultsView;

use super::{state, ui};

/// Main application state
pub struct App {
    /// Form lifecycle, view slots and chart ownership
    pub controller: AnalysisFormController,

    /// Endpoint every submission is POSTed to
    pub endpoint: String,

    // Comment list viewport
    pub comment_scroll: usize,
    pub comment_rows: usize,

    // UI state
    pub show_help: bool,
    pub tick_count: usize,

    // Viewport
    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl App {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            controller: AnalysisFormController::new(),
            endpoint: endpoint.into(),
            comment_scroll: 0,
            comment_rows: ui::visible_comment_rows(24),
            show_help: false,
            tick_count: 0,
            viewport_width: 80,
            viewport_height: 24,
        }
    }

    pub fn view(&self) -> &ResultsView {
        self.controller.view()
    }

    pub fn url_input(&self) -> &str {
        self.controller.url_input()
    }

    /// Periodic tick: advance the spinner and expire the error banner
    pub fn tick(&mut self, now: Instant) {
        self.tick_count = self.tick_count.wrapping_add(1);
        self.controller.tick(now);
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.comment_rows = ui::visible_comment_rows(height);
        self.clamp_comment_scroll();
    }

    /// Scroll the comment list by `delta` entries
    pub fn scroll_comments(&mut self, delta: isize) {
        self.comment_scroll = state::scroll_by(
            self.comment_scroll,
            delta,
            self.view().comments.len(),
            self.comment_rows,
        );
    }

    /// Entries per page for PageUp/PageDown
    pub fn comment_page(&self) -> isize {
        self.comment_rows.max(1) as isize
    }

    pub fn clamp_comment_scroll(&mut self) {
        self.scroll_comments(0);
    }

    /// Spinner glyph for the loading indicator
    pub fn spinner(&self) -> &'static str {
        state::spinner_frame(self.tick_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_app() {
        let app = App::new("http://localhost:8000/analyze/");
        assert_eq!(app.endpoint, "http://localhost:8000/analyze/");
        assert!(app.url_input().is_empty());
        assert!(!app.show_help);
        assert_eq!(app.comment_scroll, 0);
    }

    #[test]
    fn test_scroll_without_comments_stays_at_zero() {
        let mut app = App::new("http://api");
        app.scroll_comments(5);
        assert_eq!(app.comment_scroll, 0);
    }

    #[test]
    fn test_tick_advances_spinner() {
        let mut app = App::new("http://api");
        let before = app.spinner();
        app.tick(Instant::now());
        assert_ne!(before, app.spinner());
    }
}
