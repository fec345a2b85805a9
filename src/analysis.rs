//! Analysis request/response model
//!
//! The endpoint is a black box. Only the top-level shape of its answer is
//! checked (see [`validate_response_data`]); everything nested is carried as
//! raw JSON and displayed verbatim, so a sloppy server never crashes the view.

use serde::Serialize;
use serde_json::Value;

/// Form field carrying the submitted URL
pub const URL_FIELD: &str = "url";

/// Payload of one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub url: String,
}

impl AnalysisRequest {
    /// Build a request from raw form input. Returns None for blank input;
    /// otherwise the input is sent as typed.
    pub fn new(url: &str) -> Option<Self> {
        if url.trim().is_empty() {
            None
        } else {
            Some(Self {
                url: url.to_string(),
            })
        }
    }
}

/// Shallow structural check of a parsed response body.
///
/// Only `statistics.positive` is type-checked. `neutral`, `negative` and the
/// individual result items are not checked.
pub fn validate_response_data(data: &Value) -> bool {
    let Some(obj) = data.as_object() else {
        return false;
    };
    if !is_truthy(obj.get("statistics")) || !is_truthy(obj.get("results")) {
        return false;
    }
    if !data["statistics"]["positive"].is_number() {
        return false;
    }
    data["results"].is_array()
}

/// Truthiness of an optional JSON value: null, false, 0, "" and missing are falsy
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Server-supplied `error` text, if the body carries a usable one
pub fn server_error_message(data: &Value) -> Option<String> {
    let error = data.get("error");
    if !is_truthy(error) {
        return None;
    }
    error.map(|e| match e {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// A raw JSON value rendered verbatim into labels
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatValue(pub Option<Value>);

impl StatValue {
    fn field(parent: &Value, key: &str) -> Self {
        StatValue(parent.get(key).cloned())
    }

    /// Numeric value for chart data; anything non-numeric counts as zero
    pub fn as_chart_value(&self) -> f64 {
        self.0.as_ref().and_then(Value::as_f64).unwrap_or(0.0)
    }
}

impl std::fmt::Display for StatValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            None => write!(f, "undefined"),
            Some(Value::String(s)) => write!(f, "{}", s),
            Some(Value::Number(n)) => match whole_number(n) {
                Some(i) => write!(f, "{}", i),
                None => write!(f, "{}", n),
            },
            Some(other) => write!(f, "{}", other),
        }
    }
}

/// Largest integer an f64 holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Integral floats such as `70.0` print without the fraction, like `70`
fn whole_number(n: &serde_json::Number) -> Option<i64> {
    if n.is_i64() || n.is_u64() {
        return None;
    }
    let f = n.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER {
        Some(f as i64)
    } else {
        None
    }
}

/// Sentiment category of a single classified comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    /// Anything the server sent that is not one of the three known labels
    Other(String),
}

impl Sentiment {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) => match s.as_str() {
                "Positive" => Sentiment::Positive,
                "Neutral" => Sentiment::Neutral,
                "Negative" => Sentiment::Negative,
                _ => Sentiment::Other(s.clone()),
            },
            other => Sentiment::Other(StatValue(other.cloned()).to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
            Sentiment::Other(s) => s,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The three category percentages
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statistics {
    pub positive: StatValue,
    pub neutral: StatValue,
    pub negative: StatValue,
}

/// One classified comment
#[derive(Debug, Clone, PartialEq)]
pub struct CommentResult {
    pub text: StatValue,
    pub sentiment: Sentiment,
    pub confidence: StatValue,
}

impl CommentResult {
    fn from_value(item: &Value) -> Self {
        Self {
            text: StatValue::field(item, "text"),
            sentiment: Sentiment::from_value(item.get("sentiment")),
            confidence: StatValue::field(item, "confidence"),
        }
    }
}

/// A response that passed [`validate_response_data`]
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResponse {
    pub statistics: Statistics,
    pub results: Vec<CommentResult>,
}

impl AnalysisResponse {
    /// Project a parsed body onto the model. Returns None if the shape check fails.
    pub fn from_value(data: &Value) -> Option<Self> {
        if !validate_response_data(data) {
            return None;
        }
        let stats = &data["statistics"];
        let results: Vec<CommentResult> = data["results"]
            .as_array()
            .map(|items| items.iter().map(CommentResult::from_value).collect())
            .unwrap_or_default();

        Some(Self {
            statistics: Statistics {
                positive: StatValue::field(stats, "positive"),
                neutral: StatValue::field(stats, "neutral"),
                negative: StatValue::field(stats, "negative"),
            },
            results,
        })
    }
}
