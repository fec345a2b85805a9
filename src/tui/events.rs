//! Event handling for the TUI
//!
//! Translates crossterm events into messages for the update function.

use crossterm::event::{Event, KeyEvent, KeyEventKind};

use super::app::App;
use super::msg::{key_to_msg, Msg};

/// Convert a terminal event into a message
pub fn event_to_msg(app: &App, event: Event) -> Msg {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(width, height) => Msg::Resize(width, height),
        Event::Paste(text) => paste_to_msg(&text),
        _ => Msg::Noop,
    }
}

fn handle_key(app: &App, key: KeyEvent) -> Msg {
    // Windows reports both press and release
    if key.kind == KeyEventKind::Release {
        return Msg::Noop;
    }
    key_to_msg(
        key.code,
        key.modifiers,
        app.url_input().is_empty(),
        app.show_help,
    )
}

/// Only the first line of pasted text reaches the URL field
fn paste_to_msg(text: &str) -> Msg {
    match text.lines().next().map(str::trim) {
        Some(line) if !line.is_empty() => Msg::Paste(line.to_string()),
        _ => Msg::Noop,
    }
}
