//! Sentiview - terminal client for sentiment-analysis endpoints
//!
//! Submit a URL, get back how its comments split between positive, neutral
//! and negative, a donut chart of that split, and every classified comment.
//!
//! # Overview
//!
//! The analysis itself happens on a remote endpoint. This crate owns the
//! client side: the form lifecycle (ready, loading, success, error), the
//! shallow validation of the response, and the projection of a response onto
//! display slots that a CLI, a TUI or an HTML report can draw from.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`analysis`] | Request/response types and response validation |
//! | [`client`] | Transport seam and the multipart POST |
//! | [`controller`] | Form state machine |
//! | [`render`] | Display slots, chart lifecycle, comment entries |
//! | [`report`] | HTML and JSON reports |
//! | [`tui`] | Interactive terminal form |
//!
//! # Quick Start
//!
//! ```no_run
//! use sentiview::{AnalysisFormController, HttpTransport};
//!
//! let transport = HttpTransport::new(None).unwrap();
//! let mut form = AnalysisFormController::new();
//!
//! form.submit(&transport, "http://localhost:8000/analyze/", "https://example.com/video");
//!
//! let view = form.view();
//! println!("positive: {}", view.percentages.positive);
//! for comment in &view.comments {
//!     println!("{} ({})", comment.text, comment.label);
//! }
//! ```

pub mod analysis;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod render;
pub mod report;
pub mod tui;

pub use analysis::{
    validate_response_data, AnalysisRequest, AnalysisResponse, CommentResult, Sentiment,
    StatValue, Statistics,
};
pub use client::{execute, interpret, Analysis, HttpTransport, Outcome, RawResponse, Transport};
pub use config::{Config, ConfigError};
pub use controller::{AnalysisFormController, Submission, UiState, LOADING_LABEL, READY_LABEL};
pub use error::AnalysisError;
pub use render::{
    BorderColor, ChartCanvas, ChartConfig, ChartHandle, CommentItem, ResultsRenderer, ResultsView,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify core types are re-exported from crate root
        let form = AnalysisFormController::new();
        assert_eq!(form.state(), UiState::Idle);
        assert_eq!(form.view().button_label, READY_LABEL);
    }
}
