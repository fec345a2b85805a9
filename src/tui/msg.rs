//! TEA Message Types for the TUI
//!
//! Messages describe what happened: a key press, a tick, or a request that
//! settled on a worker thread. They are processed by a single update function.

use crossterm::event::{KeyCode, KeyModifiers};

use crate::client::Outcome;

/// All possible messages/actions in the TUI
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    // === Form ===
    /// Append a character to the URL input
    Input(char),
    /// Append pasted text to the URL input
    Paste(String),
    /// Remove the last character of the URL input
    Backspace,
    /// Clear the URL input
    ClearInput,
    /// Submit the form
    Submit,

    // === Results ===
    /// Scroll the comment list up by one
    ScrollUp,
    /// Scroll the comment list down by one
    ScrollDown,
    /// Scroll the comment list up by a page
    PageUp,
    /// Scroll the comment list down by a page
    PageDown,

    // === Modals ===
    /// Toggle help overlay
    ToggleHelp,

    // === Requests ===
    /// A request finished on a worker thread
    Settled { generation: u64, outcome: Outcome },

    // === Lifecycle ===
    /// Quit the application
    Quit,
    /// Tick event (timers, spinner)
    Tick,
    /// Window resized
    Resize(u16, u16),

    // === Internal ===
    /// No operation (for unhandled keys)
    Noop,
}

/// Convert a key event to a message
///
/// `input_empty` enables single-key shortcuts that would otherwise be typed
/// into the URL field.
pub fn key_to_msg(code: KeyCode, modifiers: KeyModifiers, input_empty: bool, help_open: bool) -> Msg {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Msg::Quit,
            KeyCode::Char('u') => Msg::ClearInput,
            KeyCode::Char('d') => Msg::PageDown,
            _ => Msg::Noop,
        };
    }

    if help_open {
        return match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::F(1) => {
                Msg::ToggleHelp
            }
            _ => Msg::Noop,
        };
    }

    match code {
        KeyCode::Enter => Msg::Submit,
        KeyCode::Esc => Msg::ClearInput,
        KeyCode::Backspace => Msg::Backspace,

        KeyCode::Up => Msg::ScrollUp,
        KeyCode::Down => Msg::ScrollDown,
        KeyCode::PageUp => Msg::PageUp,
        KeyCode::PageDown => Msg::PageDown,

        KeyCode::F(1) => Msg::ToggleHelp,
        KeyCode::Char('?') if input_empty => Msg::ToggleHelp,
        KeyCode::Char('q') if input_empty => Msg::Quit,

        KeyCode::Char(c) => Msg::Input(c),

        _ => Msg::Noop,
    }
}

/// Check if a message should cause the app to quit
pub fn is_quit(msg: &Msg) -> bool {
    matches!(msg, Msg::Quit)
}
