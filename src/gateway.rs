//! External analysis gateway: one request, one reply, classified errors.

use reqwest::StatusCode;
use tracing::{debug, error, warn};

use crate::api::openai::{ChatErrorResponse, ChatRequest, ChatResponse};
use crate::client::{AnalysisError, Transport, TransportReply};
use crate::http::HttpTransport;

/// Content used when the provider returns a choice without text.
const EMPTY_REPLY: &str = "{}";

/// Sends assembled chat requests to a Chat Completions endpoint.
///
/// The credential is injected at construction. Each `send` is a single
/// attempt; retry policy belongs to the caller.
#[derive(Debug, Clone)]
pub struct AnalysisGateway<T = HttpTransport> {
    api_key: Option<String>,
    base_url: String,
    transport: T,
}

impl<T: Transport> AnalysisGateway<T> {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>, transport: T) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send the request and return the raw text of the model's reply.
    pub async fn send(&self, request: &ChatRequest) -> Result<String, AnalysisError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AnalysisError::Configuration("OPENAI_API_KEY is not set".to_string())
        })?;

        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        debug!(%url, model = %request.model, "Sending analysis request");

        let reply = self.transport.post(&url, api_key, request).await?;
        extract_content(reply)
    }
}

fn extract_content(reply: TransportReply) -> Result<String, AnalysisError> {
    if !reply.status.is_success() {
        return Err(classify_error(reply.status, &reply.body));
    }

    let response: ChatResponse = serde_json::from_str(&reply.body).map_err(|e| {
        error!("Failed to decode completion envelope: {}", e);
        AnalysisError::MalformedResponse(format!("invalid completion envelope: {e}"))
    })?;

    if let Some(usage) = &response.usage {
        debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "Token usage"
        );
    }

    let choice = response.choices.into_iter().next().ok_or_else(|| {
        AnalysisError::MalformedResponse("completion contained no choices".to_string())
    })?;

    if choice.finish_reason.as_deref() == Some("length") {
        warn!("Model reply was cut off by the token limit");
    }

    let content = choice.message.content.filter(|c| !c.trim().is_empty());
    match (content, choice.message.refusal) {
        (Some(content), _) => Ok(content),
        (None, Some(refusal)) => {
            warn!("Model refused the analysis: {}", refusal);
            Err(AnalysisError::Provider(refusal))
        }
        (None, None) => Ok(EMPTY_REPLY.to_string()),
    }
}

/// Map a non-success provider status to the error taxonomy.
pub fn classify_error(status: StatusCode, body: &str) -> AnalysisError {
    let message = provider_message(status, body);
    warn!(status = %status, "Provider returned an error: {}", message);

    match status {
        StatusCode::UNAUTHORIZED => AnalysisError::Authentication(message),
        StatusCode::TOO_MANY_REQUESTS => AnalysisError::RateLimited(message),
        s if s.is_server_error() => AnalysisError::ProviderInternal(message),
        _ => AnalysisError::Provider(message),
    }
}

fn provider_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ChatErrorResponse>(body) {
        Ok(error_resp) => {
            if let Some(error_type) = &error_resp.error.error_type {
                debug!(%status, error_type = %error_type, "Provider error type");
            }
            error_resp.error.message
        }
        Err(_) if body.trim().is_empty() => format!("HTTP {}", status),
        Err(_) => body.trim().to_string(),
    }
}
