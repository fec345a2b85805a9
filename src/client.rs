//! Request execution against the analysis endpoint
//!
//! One submission is one POST: a multipart body with a single `url` field.
//! The body is parsed as JSON regardless of status, then mapped to either a
//! validated [`AnalysisResponse`] or an [`AnalysisError`].

use std::time::Duration;

use serde_json::Value;

use crate::analysis::{server_error_message, AnalysisRequest, AnalysisResponse, URL_FIELD};
use crate::error::{AnalysisError, FALLBACK_ERROR};

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Equivalent of `response.ok`: any 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can deliver a form submission to an endpoint
pub trait Transport {
    fn post_form(
        &self,
        endpoint: &str,
        request: &AnalysisRequest,
    ) -> Result<RawResponse, AnalysisError>;
}

impl<F> Transport for F
where
    F: Fn(&str, &AnalysisRequest) -> Result<RawResponse, AnalysisError>,
{
    fn post_form(
        &self,
        endpoint: &str,
        request: &AnalysisRequest,
    ) -> Result<RawResponse, AnalysisError> {
        self(endpoint, request)
    }
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build a client. `None` leaves timeouts entirely to the transport.
    pub fn new(timeout: Option<Duration>) -> Result<Self, AnalysisError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("sentiview/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::request(format!("Client error: {}", e)))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post_form(
        &self,
        endpoint: &str,
        request: &AnalysisRequest,
    ) -> Result<RawResponse, AnalysisError> {
        let form = reqwest::blocking::multipart::Form::new().text(URL_FIELD, request.url.clone());

        let response = self
            .client
            .post(endpoint)
            .multipart(form)
            .send()
            .map_err(|e| AnalysisError::request(format!("Request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| AnalysisError::request(format!("Failed to read body: {}", e)))?;

        Ok(RawResponse { status, body })
    }
}

/// A successful round-trip: the raw body plus its validated projection
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub raw: Value,
    pub response: AnalysisResponse,
}

/// Outcome of one submission
pub type Outcome = Result<Analysis, AnalysisError>;

/// Perform one submission and classify its result
pub fn execute<T: Transport + ?Sized>(
    transport: &T,
    endpoint: &str,
    request: &AnalysisRequest,
) -> Outcome {
    let raw = transport.post_form(endpoint, request)?;
    interpret(&raw)
}

/// Map a raw exchange to an outcome: JSON first, then status, then shape
pub fn interpret(raw: &RawResponse) -> Outcome {
    let data: Value = serde_json::from_str(&raw.body)
        .map_err(|e| AnalysisError::request(format!("Invalid JSON in response: {}", e)))?;
    log::debug!("Response data (status {}): {}", raw.status, data);

    if !raw.is_success() {
        let message = server_error_message(&data).unwrap_or_else(|| FALLBACK_ERROR.to_string());
        return Err(AnalysisError::request(message));
    }

    let response = AnalysisResponse::from_value(&data).ok_or(AnalysisError::Shape)?;
    Ok(Analysis {
        raw: data,
        response,
    })
}
