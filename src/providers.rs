//! Endpoint presets that produce configured gateways.

use crate::client::AnalysisError;
use crate::gateway::AnalysisGateway;
use crate::http::HttpTransport;
use crate::options::TransportOptions;

/// Trait for providers that can create configured gateways.
pub trait Provider {
    /// Base URL used when none is given.
    fn default_api_base() -> &'static str;

    /// Vision model used when none is configured.
    fn default_model() -> &'static str;

    /// Create a gateway with default transport options.
    fn create(api_key: Option<String>) -> Result<AnalysisGateway<HttpTransport>, AnalysisError> {
        Self::create_with_options(api_key, None, &TransportOptions::default())
    }

    /// Create a gateway with a custom base URL and transport options.
    fn create_with_options(
        api_key: Option<String>,
        base_url: Option<String>,
        transport_options: &TransportOptions,
    ) -> Result<AnalysisGateway<HttpTransport>, AnalysisError> {
        let transport = HttpTransport::new(transport_options.clone())?;
        let base_url = base_url.unwrap_or_else(|| Self::default_api_base().to_string());
        Ok(AnalysisGateway::new(api_key, base_url, transport))
    }
}

pub mod openai;

pub use openai::OpenAi;
