//! Error kinds surfaced by an analysis submission
//!
//! Both kinds end up in the same place: the error banner. They differ only in
//! where the message comes from.

/// Message used when the server reports a failure without an `error` field
pub const FALLBACK_ERROR: &str = "Analysis failed";

/// Message used when a successful response fails the shape check
pub const SHAPE_ERROR: &str = "Invalid response data format";

/// Message used when an error would otherwise render as an empty banner
pub const GENERIC_ERROR: &str = "An error occurred during analysis. Please try again.";

/// Error type for a single analysis round-trip
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Non-success status, transport failure, or an unreadable body
    Request { message: String },
    /// Response parsed as JSON but is not shaped like an analysis
    Shape,
}

impl AnalysisError {
    /// Build a request error from any message
    pub fn request(message: impl Into<String>) -> Self {
        AnalysisError::Request {
            message: message.into(),
        }
    }

    /// Text shown in the error banner
    pub fn banner_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_ERROR.to_string()
        } else {
            message
        }
    }
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::Request { message } => write!(f, "{}", message),
            AnalysisError::Shape => write!(f, "{}", SHAPE_ERROR),
        }
    }
}

impl std::error::Error for AnalysisError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_message() {
        assert_eq!(AnalysisError::Shape.to_string(), "Invalid response data format");
        assert_eq!(AnalysisError::Shape.banner_message(), SHAPE_ERROR);
    }

    #[test]
    fn test_request_error_uses_message_verbatim() {
        let err = AnalysisError::request("Rate limited");
        assert_eq!(err.banner_message(), "Rate limited");
    }

    #[test]
    fn test_empty_message_falls_back_to_generic() {
        let err = AnalysisError::request("   ");
        assert_eq!(err.banner_message(), GENERIC_ERROR);
    }
}
