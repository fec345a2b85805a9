//! Terminal User Interface for Sentiview
//!
//! An interactive form for the analysis endpoint:
//! - URL input with submit/loading states
//! - Percentage summary and a donut chart of the distribution
//! - Scrollable per-comment results
//! - Error banner that hides itself after a few seconds
//!
//! Requests run on worker threads and report back over a channel, so the
//! UI keeps drawing while a submission is in flight.

pub mod app;
pub mod events;
pub mod msg; // TEA message types (what happened)
pub mod state; // Pure state transformations (functional core)
pub mod ui;
pub mod update; // TEA update function (state transitions)
pub mod views;

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    event::{poll, read, DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::client::{self, Transport};
use crate::controller::Submission;
use app::App;
use msg::Msg;
use update::{update, Cmd};

/// Transport shared with worker threads
pub type SharedTransport = Arc<dyn Transport + Send + Sync>;

/// Run the TUI application
pub fn run(endpoint: &str, transport: SharedTransport) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app, ensuring cleanup happens even on error
    let result = run_app_inner(&mut terminal, endpoint, transport);

    // Restore terminal - this MUST run even if app fails
    let _ = disable_raw_mode();
    let _ = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    );
    let _ = terminal.show_cursor();

    result
}

fn run_app_inner<B: Backend>(
    terminal: &mut Terminal<B>,
    endpoint: &str,
    transport: SharedTransport,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(endpoint);
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    // Worker threads report settled requests here
    let (tx, rx) = mpsc::channel();

    let result = run_event_loop(terminal, &mut app, &transport, tx, rx);
    app.controller.teardown();
    result
}

fn run_event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    transport: &SharedTransport,
    tx: Sender<Msg>,
    rx: Receiver<Msg>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        // Draw the UI
        terminal.draw(|f| ui::draw(f, app))?;

        // Handle input with timeout
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if poll(timeout)? {
            let msg = events::event_to_msg(app, read()?);
            if dispatch(msg, app, transport, &tx) {
                return Ok(()); // Quit signal
            }
        }

        // Settled requests (non-blocking)
        while let Ok(msg) = rx.try_recv() {
            if dispatch(msg, app, transport, &tx) {
                return Ok(());
            }
        }

        // Tick for the spinner and banner timeout
        if last_tick.elapsed() >= tick_rate {
            dispatch(Msg::Tick, app, transport, &tx);
            last_tick = Instant::now();
        }
    }
}

/// Apply a message and execute the resulting command. Returns true on quit.
fn dispatch(msg: Msg, app: &mut App, transport: &SharedTransport, tx: &Sender<Msg>) -> bool {
    match update(msg, app, Instant::now()) {
        Cmd::None => false,
        Cmd::Quit => true,
        Cmd::Send(submission) => {
            spawn_request(submission, &app.endpoint, Arc::clone(transport), tx.clone());
            false
        }
    }
}

/// POST the submission on a worker thread and send the outcome back
fn spawn_request(submission: Submission, endpoint: &str, transport: SharedTransport, tx: Sender<Msg>) {
    let endpoint = endpoint.to_string();
    log::debug!(
        "Spawning request #{} for {}",
        submission.generation,
        submission.request.url
    );
    thread::spawn(move || {
        let outcome = client::execute(transport.as_ref(), &endpoint, &submission.request);
        // receiver is gone once the TUI has quit
        let _ = tx.send(Msg::Settled {
            generation: submission.generation,
            outcome,
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisRequest;
    use crate::client::RawResponse;
    use crate::controller::UiState;
    use crate::error::AnalysisError;

    #[test]
    fn test_spawn_request_reports_back() {
        let transport: SharedTransport = Arc::new(
            |_: &str, _: &AnalysisRequest| -> Result<RawResponse, AnalysisError> {
                Ok(RawResponse::new(
                    200,
                    r#"{"statistics":{"positive":1,"neutral":0,"negative":0},"results":[]}"#,
                ))
            },
        );
        let (tx, rx) = mpsc::channel();
        let mut app = App::new("http://api");
        app.controller.set_url_input("http://example.com");

        assert!(!dispatch(Msg::Submit, &mut app, &transport, &tx));
        assert_eq!(app.controller.state(), UiState::Loading);

        let msg = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(msg, Msg::Settled { generation: 1, .. }));
        dispatch(msg, &mut app, &transport, &tx);
        assert_eq!(app.controller.state(), UiState::Success);
        assert!(app.view().results_visible);
    }
}
