//! Results rendering
//!
//! [`ResultsView`] is the set of display slots a surface draws from: panel
//! visibility, loading indicator, submit label, error banner, percentage
//! labels, chart canvas and comment list. [`ResultsRenderer`] projects a
//! validated response onto it.
//!
//! The chart lives on a [`ChartCanvas`]. Each attach returns a [`ChartHandle`]
//! and the renderer holds at most one. A new render always destroys the old
//! instance before attaching the next, so repeated submissions never stack
//! charts on the same canvas.

use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::json;

use crate::analysis::{AnalysisResponse, Sentiment, Statistics};
use crate::controller::READY_LABEL;

/// Fixed category labels, in chart order
pub const CHART_LABELS: [&str; 3] = ["Positive", "Neutral", "Negative"];

/// Fixed category colors (green, gray, red), in chart order
pub const CHART_COLORS: [&str; 3] = ["#10B981", "#6B7280", "#EF4444"];

/// How long the error banner stays up
pub const ERROR_BANNER_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// Chart
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
}

/// Everything needed to draw one proportion chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    pub colors: Vec<String>,
    pub legend: LegendPosition,
    pub responsive: bool,
}

impl ChartConfig {
    /// The sentiment donut: three fixed categories bound to the statistics
    pub fn sentiment(stats: &Statistics) -> Self {
        Self {
            kind: ChartKind::Doughnut,
            labels: CHART_LABELS.iter().map(|s| s.to_string()).collect(),
            data: vec![
                stats.positive.as_chart_value(),
                stats.neutral.as_chart_value(),
                stats.negative.as_chart_value(),
            ],
            colors: CHART_COLORS.iter().map(|s| s.to_string()).collect(),
            legend: LegendPosition::Bottom,
            responsive: true,
        }
    }

    /// Share of the whole for each segment, in [0, 1]. All zeros if the total is zero.
    pub fn fractions(&self) -> Vec<f64> {
        let total: f64 = self.data.iter().map(|v| v.max(0.0)).sum();
        self.data
            .iter()
            .map(|v| if total > 0.0 { v.max(0.0) / total } else { 0.0 })
            .collect()
    }

    /// Chart.js configuration object for this chart
    pub fn to_chartjs(&self) -> serde_json::Value {
        json!({
            "type": self.kind,
            "data": {
                "labels": self.labels,
                "datasets": [{
                    "data": self.data,
                    "backgroundColor": self.colors,
                }]
            },
            "options": {
                "responsive": self.responsive,
                "plugins": {
                    "legend": { "position": self.legend }
                }
            }
        })
    }
}

/// Ownership token for a chart attached to a canvas. Not cloneable.
#[derive(Debug, PartialEq, Eq)]
pub struct ChartHandle {
    id: u64,
}

impl ChartHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Detach this chart from its canvas, consuming the handle
    pub fn destroy(self, canvas: &mut ChartCanvas) {
        canvas.detach(self.id);
    }
}

/// Render target that charts are attached to
#[derive(Debug, Default)]
pub struct ChartCanvas {
    next_id: u64,
    instances: Vec<(u64, ChartConfig)>,
}

impl ChartCanvas {
    pub fn attach(&mut self, config: ChartConfig) -> ChartHandle {
        self.next_id += 1;
        let id = self.next_id;
        self.instances.push((id, config));
        log::trace!("chart {} attached ({} live)", id, self.instances.len());
        ChartHandle { id }
    }

    fn detach(&mut self, id: u64) {
        self.instances.retain(|(existing, _)| *existing != id);
        log::trace!("chart {} destroyed ({} live)", id, self.instances.len());
    }

    pub fn live_instances(&self) -> usize {
        self.instances.len()
    }

    pub fn get(&self, handle: &ChartHandle) -> Option<&ChartConfig> {
        self.instances
            .iter()
            .find(|(id, _)| *id == handle.id)
            .map(|(_, config)| config)
    }

    /// The most recently attached chart, if any
    pub fn current(&self) -> Option<&ChartConfig> {
        self.instances.last().map(|(_, config)| config)
    }
}

// =============================================================================
// Comments
// =============================================================================

/// Left-border color of a comment entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderColor {
    Green,
    Gray,
    Red,
}

impl BorderColor {
    /// Unrecognized labels fall back to gray
    pub fn for_sentiment(sentiment: &Sentiment) -> Self {
        match sentiment {
            Sentiment::Positive => BorderColor::Green,
            Sentiment::Negative => BorderColor::Red,
            Sentiment::Neutral | Sentiment::Other(_) => BorderColor::Gray,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            BorderColor::Green => "border-green-500",
            BorderColor::Gray => "border-gray-500",
            BorderColor::Red => "border-red-500",
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            BorderColor::Green => CHART_COLORS[0],
            BorderColor::Gray => CHART_COLORS[1],
            BorderColor::Red => CHART_COLORS[2],
        }
    }
}

/// One rendered entry in the comment list
#[derive(Debug, Clone, PartialEq)]
pub struct CommentItem {
    pub border: BorderColor,
    pub text: String,
    pub label: String,
    pub confidence: String,
}

/// The three percentage label slots
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PercentageLabels {
    pub positive: String,
    pub neutral: String,
    pub negative: String,
}

// =============================================================================
// View
// =============================================================================

/// Visible error message with the moment it was shown
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBanner {
    pub message: String,
    pub shown_at: Instant,
}

impl ErrorBanner {
    pub fn new(message: impl Into<String>, shown_at: Instant) -> Self {
        Self {
            message: message.into(),
            shown_at,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= ERROR_BANNER_TIMEOUT
    }
}

/// Display slots shared by every surface
#[derive(Debug)]
pub struct ResultsView {
    pub url_input: String,
    pub results_visible: bool,
    pub loading_visible: bool,
    pub button_label: String,
    pub error_banner: Option<ErrorBanner>,
    pub percentages: PercentageLabels,
    pub canvas: ChartCanvas,
    pub comments: Vec<CommentItem>,
}

impl Default for ResultsView {
    fn default() -> Self {
        Self {
            url_input: String::new(),
            results_visible: false,
            loading_visible: false,
            button_label: READY_LABEL.to_string(),
            error_banner: None,
            percentages: PercentageLabels::default(),
            canvas: ChartCanvas::default(),
            comments: Vec::new(),
        }
    }
}

impl ResultsView {
    /// Chart currently drawn on the canvas
    pub fn chart(&self) -> Option<&ChartConfig> {
        self.canvas.current()
    }
}

/// Projects validated responses onto a [`ResultsView`]; owns the live chart
#[derive(Debug, Default)]
pub struct ResultsRenderer {
    chart: Option<ChartHandle>,
}

impl ResultsRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, view: &mut ResultsView, response: &AnalysisResponse) {
        view.results_visible = true;

        let stats = &response.statistics;
        view.percentages = PercentageLabels {
            positive: format!("{}%", stats.positive),
            neutral: format!("{}%", stats.neutral),
            negative: format!("{}%", stats.negative),
        };

        self.destroy_chart(&mut view.canvas);
        self.create_chart(&mut view.canvas, ChartConfig::sentiment(stats));

        view.comments = response
            .results
            .iter()
            .map(|result| CommentItem {
                border: BorderColor::for_sentiment(&result.sentiment),
                text: result.text.to_string(),
                label: result.sentiment.label().to_string(),
                confidence: format!("Confidence: {}%", result.confidence),
            })
            .collect();
    }

    /// Destroy the live chart, if any
    pub fn destroy_chart(&mut self, canvas: &mut ChartCanvas) {
        if let Some(handle) = self.chart.take() {
            handle.destroy(canvas);
        }
    }

    fn create_chart(&mut self, canvas: &mut ChartCanvas, config: ChartConfig) {
        debug_assert!(self.chart.is_none(), "previous chart must be destroyed first");
        self.chart = Some(canvas.attach(config));
    }

    pub fn chart_handle(&self) -> Option<&ChartHandle> {
        self.chart.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(data: serde_json::Value) -> AnalysisResponse {
        AnalysisResponse::from_value(&data).unwrap()
    }

    fn scenario_a() -> AnalysisResponse {
        response(json!({
            "statistics": {"positive": 70, "neutral": 20, "negative": 10},
            "results": [{"text": "Great!", "sentiment": "Positive", "confidence": 95}]
        }))
    }

    #[test]
    fn test_render_scenario_a() {
        let mut view = ResultsView::default();
        let mut renderer = ResultsRenderer::new();
        renderer.render(&mut view, &scenario_a());

        assert!(view.results_visible);
        assert_eq!(view.percentages.positive, "70%");
        assert_eq!(view.percentages.neutral, "20%");
        assert_eq!(view.percentages.negative, "10%");

        assert_eq!(view.comments.len(), 1);
        let item = &view.comments[0];
        assert_eq!(item.border, BorderColor::Green);
        assert_eq!(item.text, "Great!");
        assert_eq!(item.label, "Positive");
        assert_eq!(item.confidence, "Confidence: 95%");
    }

    #[test]
    fn test_render_twice_keeps_one_chart() {
        let mut view = ResultsView::default();
        let mut renderer = ResultsRenderer::new();
        let payload = scenario_a();

        renderer.render(&mut view, &payload);
        renderer.render(&mut view, &payload);

        assert_eq!(view.canvas.live_instances(), 1);
        assert_eq!(view.comments.len(), payload.results.len());
        let handle = renderer.chart_handle().unwrap();
        assert!(view.canvas.get(handle).is_some());
        // the first chart (id 1) was destroyed before the second was attached
        assert_eq!(handle.id(), 2);
    }

    #[test]
    fn test_render_integral_floats_without_fraction() {
        let mut view = ResultsView::default();
        ResultsRenderer::new().render(
            &mut view,
            &response(json!({
                "statistics": {"positive": 70.0, "neutral": 20.0, "negative": 10.0},
                "results": [{"text": "Great!", "sentiment": "Positive", "confidence": 95.0}]
            })),
        );

        assert_eq!(view.percentages.positive, "70%");
        assert_eq!(view.percentages.neutral, "20%");
        assert_eq!(view.percentages.negative, "10%");
        assert_eq!(view.comments[0].confidence, "Confidence: 95%");
    }

    #[test]
    fn test_render_fractional_values_verbatim() {
        let mut view = ResultsView::default();
        ResultsRenderer::new().render(
            &mut view,
            &response(json!({
                "statistics": {"positive": 12.5, "neutral": 87.5, "negative": 0},
                "results": [{"text": "Meh", "sentiment": "Neutral", "confidence": 66.7}]
            })),
        );

        assert_eq!(view.percentages.positive, "12.5%");
        assert_eq!(view.percentages.negative, "0%");
        assert_eq!(view.comments[0].confidence, "Confidence: 66.7%");
    }

    #[test]
    fn test_render_replaces_comments() {
        let mut view = ResultsView::default();
        let mut renderer = ResultsRenderer::new();
        renderer.render(
            &mut view,
            &response(json!({
                "statistics": {"positive": 1},
                "results": [{"text": "a"}, {"text": "b"}, {"text": "c"}]
            })),
        );
        assert_eq!(view.comments.len(), 3);

        renderer.render(&mut view, &scenario_a());
        assert_eq!(view.comments.len(), 1);
        assert_eq!(view.comments[0].text, "Great!");
    }

    #[test]
    fn test_chart_config_is_fixed_doughnut() {
        let mut view = ResultsView::default();
        ResultsRenderer::new().render(&mut view, &scenario_a());
        let chart = view.chart().unwrap();

        assert_eq!(chart.kind, ChartKind::Doughnut);
        assert_eq!(chart.labels, vec!["Positive", "Neutral", "Negative"]);
        assert_eq!(chart.colors, vec!["#10B981", "#6B7280", "#EF4444"]);
        assert_eq!(chart.data, vec![70.0, 20.0, 10.0]);
        assert_eq!(chart.legend, LegendPosition::Bottom);
        assert!(chart.responsive);
    }

    #[test]
    fn test_chartjs_config_shape() {
        let config = ChartConfig::sentiment(&scenario_a().statistics);
        let js = config.to_chartjs();
        assert_eq!(js["type"], "doughnut");
        assert_eq!(js["data"]["labels"][2], "Negative");
        assert_eq!(js["data"]["datasets"][0]["data"][0], 70.0);
        assert_eq!(js["data"]["datasets"][0]["backgroundColor"][1], "#6B7280");
        assert_eq!(js["options"]["plugins"]["legend"]["position"], "bottom");
        assert_eq!(js["options"]["responsive"], true);
    }

    #[test]
    fn test_fractions() {
        let config = ChartConfig::sentiment(&scenario_a().statistics);
        let fractions = config.fractions();
        assert!((fractions[0] - 0.7).abs() < 1e-9);
        assert!((fractions[2] - 0.1).abs() < 1e-9);

        let empty = ChartConfig::sentiment(&Statistics::default());
        assert_eq!(empty.fractions(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_border_colors() {
        assert_eq!(BorderColor::for_sentiment(&Sentiment::Positive), BorderColor::Green);
        assert_eq!(BorderColor::for_sentiment(&Sentiment::Neutral), BorderColor::Gray);
        assert_eq!(BorderColor::for_sentiment(&Sentiment::Negative), BorderColor::Red);
        assert_eq!(
            BorderColor::for_sentiment(&Sentiment::Other("Sarcastic".into())),
            BorderColor::Gray
        );
        assert_eq!(BorderColor::Green.css_class(), "border-green-500");
        assert_eq!(BorderColor::Red.hex(), "#EF4444");
    }

    #[test]
    fn test_unvalidated_fields_render_verbatim() {
        let mut view = ResultsView::default();
        ResultsRenderer::new().render(
            &mut view,
            &response(json!({
                "statistics": {"positive": 12.5, "neutral": "n/a"},
                "results": [{"sentiment": "Mixed"}]
            })),
        );
        assert_eq!(view.percentages.positive, "12.5%");
        assert_eq!(view.percentages.neutral, "n/a%");
        assert_eq!(view.percentages.negative, "undefined%");
        assert_eq!(view.chart().unwrap().data, vec![12.5, 0.0, 0.0]);

        let item = &view.comments[0];
        assert_eq!(item.border, BorderColor::Gray);
        assert_eq!(item.text, "undefined");
        assert_eq!(item.label, "Mixed");
        assert_eq!(item.confidence, "Confidence: undefined%");
    }

    #[test]
    fn test_destroy_chart_without_chart_is_noop() {
        let mut canvas = ChartCanvas::default();
        let mut renderer = ResultsRenderer::new();
        renderer.destroy_chart(&mut canvas);
        assert_eq!(canvas.live_instances(), 0);
    }

    #[test]
    fn test_banner_expiry() {
        let t0 = Instant::now();
        let banner = ErrorBanner::new("Rate limited", t0);
        assert!(!banner.is_expired(t0));
        assert!(!banner.is_expired(t0 + Duration::from_millis(4999)));
        assert!(banner.is_expired(t0 + Duration::from_secs(5)));
    }
}
