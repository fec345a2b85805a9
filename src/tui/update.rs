//! TEA Update Function
//!
//! ```text
//! update : Msg -> App -> Cmd
//! ```
//!
//! All state transitions happen here. Side effects (spawning a request,
//! quitting) are returned as commands for the runtime in mod.rs to execute.

use std::time::Instant;

use super::app::App;
use super::msg::Msg;
use crate::controller::Submission;

/// Commands that need to be executed by the runtime (imperative shell)
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// No command
    None,
    /// Quit the application
    Quit,
    /// Send a submission on a worker thread
    Send(Submission),
}

impl Cmd {
    /// Check if this is a quit command
    pub fn is_quit(&self) -> bool {
        matches!(self, Cmd::Quit)
    }
}

/// Process a message against the app state and return the side effect to run
pub fn update(msg: Msg, app: &mut App, now: Instant) -> Cmd {
    match msg {
        // === Lifecycle ===
        Msg::Quit => Cmd::Quit,

        Msg::Tick => {
            app.tick(now);
            Cmd::None
        }

        Msg::Resize(width, height) => {
            app.resize(width, height);
            Cmd::None
        }

        Msg::Noop => Cmd::None,

        // === Form ===
        Msg::Input(c) => {
            app.controller.url_input_mut().push(c);
            Cmd::None
        }

        Msg::Paste(text) => {
            app.controller.url_input_mut().push_str(&text);
            Cmd::None
        }

        Msg::Backspace => {
            app.controller.url_input_mut().pop();
            Cmd::None
        }

        Msg::ClearInput => {
            app.controller.url_input_mut().clear();
            Cmd::None
        }

        Msg::Submit => {
            let url = app.url_input().to_string();
            match app.controller.begin_submit(&url) {
                Some(submission) => {
                    app.comment_scroll = 0;
                    Cmd::Send(submission)
                }
                None => Cmd::None,
            }
        }

        // === Requests ===
        Msg::Settled {
            generation,
            outcome,
        } => {
            app.controller.settle(generation, &outcome, now);
            app.comment_scroll = 0;
            Cmd::None
        }

        // === Results ===
        Msg::ScrollUp => {
            app.scroll_comments(-1);
            Cmd::None
        }

        Msg::ScrollDown => {
            app.scroll_comments(1);
            Cmd::None
        }

        Msg::PageUp => {
            let page = app.comment_page();
            app.scroll_comments(-page);
            Cmd::None
        }

        Msg::PageDown => {
            let page = app.comment_page();
            app.scroll_comments(page);
            Cmd::None
        }

        // === Modals ===
        Msg::ToggleHelp => {
            app.show_help = !app.show_help;
            Cmd::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{interpret, RawResponse};
    use crate::controller::{UiState, LOADING_LABEL, READY_LABEL};
    use std::time::Duration;

    fn type_url(app: &mut App, url: &str) {
        for c in url.chars() {
            update(Msg::Input(c), app, Instant::now());
        }
    }

    fn many_comments(n: usize) -> String {
        let items: Vec<String> = (0..n)
            .map(|i| format!(r#"{{"text":"c{}","sentiment":"Neutral","confidence":50}}"#, i))
            .collect();
        format!(
            r#"{{"statistics":{{"positive":0,"neutral":100,"negative":0}},"results":[{}]}}"#,
            items.join(",")
        )
    }

    #[test]
    fn test_typing_edits_input() {
        let mut app = App::new("http://api");
        type_url(&mut app, "http://example.comX");
        update(Msg::Backspace, &mut app, Instant::now());
        assert_eq!(app.url_input(), "http://example.com");

        update(Msg::ClearInput, &mut app, Instant::now());
        assert_eq!(app.url_input(), "");

        update(Msg::Paste("http://pasted.com".into()), &mut app, Instant::now());
        assert_eq!(app.url_input(), "http://pasted.com");
    }

    #[test]
    fn test_submit_returns_send_command() {
        let mut app = App::new("http://api");
        type_url(&mut app, "http://example.com");

        let cmd = update(Msg::Submit, &mut app, Instant::now());
        match cmd {
            Cmd::Send(submission) => {
                assert_eq!(submission.request.url, "http://example.com");
                assert_eq!(submission.generation, 1);
            }
            other => panic!("expected Send, got {:?}", other),
        }
        assert_eq!(app.controller.state(), UiState::Loading);
        assert_eq!(app.view().button_label, LOADING_LABEL);
    }

    #[test]
    fn test_submit_blank_is_noop() {
        let mut app = App::new("http://api");
        assert_eq!(update(Msg::Submit, &mut app, Instant::now()), Cmd::None);
        assert_eq!(app.controller.state(), UiState::Idle);
    }

    #[test]
    fn test_submit_while_loading_starts_another_request() {
        let mut app = App::new("http://api");
        type_url(&mut app, "http://example.com");
        update(Msg::Submit, &mut app, Instant::now());
        let cmd = update(Msg::Submit, &mut app, Instant::now());
        assert!(matches!(cmd, Cmd::Send(Submission { generation: 2, .. })));
    }

    #[test]
    fn test_settled_failure_shows_banner_then_hides() {
        let mut app = App::new("http://api");
        type_url(&mut app, "http://example.com");
        update(Msg::Submit, &mut app, Instant::now());

        let t0 = Instant::now();
        let outcome = interpret(&RawResponse::new(500, r#"{"error":"Rate limited"}"#));
        update(
            Msg::Settled {
                generation: 1,
                outcome,
            },
            &mut app,
            t0,
        );
        assert_eq!(
            app.view().error_banner.as_ref().map(|b| b.message.as_str()),
            Some("Rate limited")
        );
        assert_eq!(app.view().button_label, READY_LABEL);
        assert!(!app.view().loading_visible);

        update(Msg::Tick, &mut app, t0 + Duration::from_secs(5));
        assert!(app.view().error_banner.is_none());
    }

    #[test]
    fn test_scrolling_comments() {
        let mut app = App::new("http://api");
        app.comment_rows = 4;
        type_url(&mut app, "http://example.com");
        update(Msg::Submit, &mut app, Instant::now());
        let outcome = interpret(&RawResponse::new(200, many_comments(10)));
        update(
            Msg::Settled {
                generation: 1,
                outcome,
            },
            &mut app,
            Instant::now(),
        );
        assert_eq!(app.view().comments.len(), 10);

        update(Msg::ScrollDown, &mut app, Instant::now());
        assert_eq!(app.comment_scroll, 1);
        update(Msg::PageDown, &mut app, Instant::now());
        assert_eq!(app.comment_scroll, 5);
        update(Msg::PageDown, &mut app, Instant::now());
        assert_eq!(app.comment_scroll, 6);
        update(Msg::PageUp, &mut app, Instant::now());
        assert_eq!(app.comment_scroll, 2);
        update(Msg::ScrollUp, &mut app, Instant::now());
        assert_eq!(app.comment_scroll, 1);
    }

    #[test]
    fn test_toggle_help_and_quit() {
        let mut app = App::new("http://api");
        update(Msg::ToggleHelp, &mut app, Instant::now());
        assert!(app.show_help);
        update(Msg::ToggleHelp, &mut app, Instant::now());
        assert!(!app.show_help);

        assert!(update(Msg::Quit, &mut app, Instant::now()).is_quit());
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut app = App::new("http://api");
        update(Msg::Resize(120, 40), &mut app, Instant::now());
        assert_eq!(app.viewport_width, 120);
        assert_eq!(app.viewport_height, 40);
    }
}
