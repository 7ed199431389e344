//! Error taxonomy and the transport seam used by the gateway.

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::api::openai::ChatRequest;

/// Errors that can occur while producing a body analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    InputValidation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Provider internal error: {0}")]
    ProviderInternal(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// How a failure should be presented to the end user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The submission itself is incomplete or invalid.
    Input,
    /// The service is not set up correctly; show configuration instructions.
    Setup,
    /// Worth retrying after a short delay.
    Transient,
    /// Hard failure; show a generic message.
    Failure,
}

impl AnalysisError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalysisError::InputValidation(_) => ErrorCategory::Input,
            AnalysisError::Configuration(_) | AnalysisError::Authentication(_) => {
                ErrorCategory::Setup
            }
            AnalysisError::RateLimited(_) | AnalysisError::ProviderInternal(_) => {
                ErrorCategory::Transient
            }
            AnalysisError::Http(e) if e.is_timeout() || e.is_connect() => ErrorCategory::Transient,
            AnalysisError::Provider(_)
            | AnalysisError::MalformedResponse(_)
            | AnalysisError::Http(_) => ErrorCategory::Failure,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Transient
    }

    /// Status code reported to inbound HTTP callers.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::InputValidation(_) => StatusCode::BAD_REQUEST,
            AnalysisError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AnalysisError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AnalysisError::Configuration(_)
            | AnalysisError::ProviderInternal(_)
            | AnalysisError::Provider(_)
            | AnalysisError::MalformedResponse(_)
            | AnalysisError::Http(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message suitable for showing directly to an end user.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::InputValidation(msg) => msg.clone(),
            AnalysisError::Configuration(_) => {
                "The OpenAI API key is not configured. Set OPENAI_API_KEY in the environment variables."
                    .to_string()
            }
            AnalysisError::Authentication(_) => {
                "The OpenAI API key is invalid. Check that OPENAI_API_KEY holds the correct key."
                    .to_string()
            }
            AnalysisError::RateLimited(_) => {
                "Request limit reached. Please try again in a few moments.".to_string()
            }
            AnalysisError::ProviderInternal(_) => {
                "The OpenAI server reported an error. Please try again in a few moments."
                    .to_string()
            }
            AnalysisError::Provider(msg) if !msg.trim().is_empty() => msg.clone(),
            AnalysisError::Provider(_) => {
                "Error while processing the analysis with OpenAI.".to_string()
            }
            AnalysisError::Http(e) if e.is_timeout() => {
                "The analysis took too long to complete. Please try again.".to_string()
            }
            AnalysisError::MalformedResponse(_) | AnalysisError::Http(_) => {
                "Could not analyze the photos. Please try again.".to_string()
            }
        }
    }
}

/// Raw reply from the provider endpoint.
#[derive(Debug, Clone)]
pub struct TransportReply {
    pub status: StatusCode,
    pub body: String,
}

impl TransportReply {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// One outbound POST of a chat request.
///
/// The gateway owns status classification; implementations only move bytes.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(
        &self,
        url: &str,
        api_key: &str,
        body: &ChatRequest,
    ) -> Result<TransportReply, AnalysisError>;
}
