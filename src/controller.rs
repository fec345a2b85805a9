//! The analysis form controller
//!
//! Drives one submission through its lifecycle:
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──▶ Success ──submit──▶ Loading
//!                     │
//!                     └──fail──▶ Error ──submit──▶ Loading
//! ```
//!
//! Submitting is split in two so the TUI can run the request off the UI
//! thread: [`AnalysisFormController::begin_submit`] enters Loading and hands
//! back the request, [`AnalysisFormController::settle`] applies the outcome.
//! `settle` always restores the ready label and hides the loading indicator.

use std::time::Instant;

use crate::analysis::AnalysisRequest;
use crate::client::{self, Outcome, Transport};
use crate::render::{ErrorBanner, ResultsRenderer, ResultsView};

/// Submit label while ready
pub const READY_LABEL: &str = "Analyze Sentiment";

/// Submit label while a request is in flight
pub const LOADING_LABEL: &str = "Analyzing...";

/// Lifecycle state of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    Idle,
    Loading,
    Success,
    Error,
}

impl UiState {
    /// Idle, Success and Error all accept a new submission
    pub fn is_ready(self) -> bool {
        !matches!(self, UiState::Loading)
    }
}

/// A request that has entered Loading and still needs to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub generation: u64,
    pub request: AnalysisRequest,
}

/// Owns the view, the live chart and the lifecycle state
#[derive(Debug)]
pub struct AnalysisFormController {
    state: UiState,
    view: ResultsView,
    renderer: ResultsRenderer,
    generation: u64,
}

impl Default for AnalysisFormController {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisFormController {
    pub fn new() -> Self {
        Self {
            state: UiState::Idle,
            view: ResultsView::default(),
            renderer: ResultsRenderer::new(),
            generation: 0,
        }
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn view(&self) -> &ResultsView {
        &self.view
    }

    /// Generation number of the most recent submission
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn url_input(&self) -> &str {
        &self.view.url_input
    }

    pub fn set_url_input(&mut self, url: impl Into<String>) {
        self.view.url_input = url.into();
    }

    pub fn url_input_mut(&mut self) -> &mut String {
        &mut self.view.url_input
    }

    /// Enter Loading for the given URL.
    ///
    /// Returns None, and leaves the form untouched, when the URL is blank.
    /// Does not check whether another request is still in flight.
    pub fn begin_submit(&mut self, url: &str) -> Option<Submission> {
        let request = AnalysisRequest::new(url)?;

        self.view.error_banner = None;
        self.view.loading_visible = true;
        self.view.button_label = LOADING_LABEL.to_string();
        self.view.results_visible = false;
        self.state = UiState::Loading;

        self.generation += 1;
        log::info!("Submitting #{} for {}", self.generation, request.url);

        Some(Submission {
            generation: self.generation,
            request,
        })
    }

    /// Apply the outcome of a submission and return to a ready state
    pub fn settle(&mut self, generation: u64, outcome: &Outcome, now: Instant) {
        if generation != self.generation {
            log::warn!(
                "Request #{} settled after newer request #{}; its result replaces the view",
                generation,
                self.generation
            );
        }

        match outcome {
            Ok(analysis) => {
                log::info!(
                    "Request #{} succeeded with {} result(s)",
                    generation,
                    analysis.response.results.len()
                );
                self.renderer.render(&mut self.view, &analysis.response);
                self.state = UiState::Success;
            }
            Err(e) => {
                log::error!("Request #{} failed: {}", generation, e);
                self.show_error(e.banner_message(), now);
                self.state = UiState::Error;
            }
        }

        self.view.loading_visible = false;
        self.view.button_label = READY_LABEL.to_string();
    }

    /// Blocking submit: begin, perform the request, settle.
    ///
    /// Returns None when the URL is blank and nothing was sent.
    pub fn submit<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        endpoint: &str,
        url: &str,
    ) -> Option<Outcome> {
        let submission = self.begin_submit(url)?;
        let outcome = client::execute(transport, endpoint, &submission.request);
        self.settle(submission.generation, &outcome, Instant::now());
        Some(outcome)
    }

    /// Show a message in the error banner; it hides itself after the timeout
    pub fn show_error(&mut self, message: impl Into<String>, now: Instant) {
        self.view.error_banner = Some(ErrorBanner::new(message, now));
    }

    /// Advance timers. Hides an expired error banner.
    pub fn tick(&mut self, now: Instant) {
        if self
            .view
            .error_banner
            .as_ref()
            .is_some_and(|banner| banner.is_expired(now))
        {
            self.view.error_banner = None;
        }
    }

    /// Destroy the live chart, e.g. when the surface shuts down
    pub fn teardown(&mut self) {
        self.renderer.destroy_chart(&mut self.view.canvas);
    }
}
