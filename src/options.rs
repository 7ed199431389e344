//! Model and transport configuration for the analysis request.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::HashMap;
use std::time::Duration;

use crate::prompt::PromptLanguage;

/// Vision model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Output token ceiling for the analysis reply.
pub const DEFAULT_MAX_TOKENS: u32 = 1500;

/// Upper bound on one round trip to the provider.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Model behavior parameters for the analysis request.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOptions {
    /// Model identifier (e.g., "gpt-4o").
    pub model: String,

    /// Temperature for sampling (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Top-p (nucleus) sampling parameter.
    pub top_p: Option<f32>,

    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,

    /// Language of the instruction block.
    #[serde(default)]
    pub language: PromptLanguage,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

impl ModelOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: None,
            top_p: None,
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            language: PromptLanguage::default(),
        }
    }

    pub fn with_language(mut self, language: PromptLanguage) -> Self {
        self.language = language;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Transport configuration options.
///
/// Controls how requests are sent over the network.
#[derive(Debug, Clone)]
pub enum TransportOptions {
    /// HTTP transport configuration
    Http {
        /// Request timeout. `None` disables the bound entirely.
        timeout: Option<Duration>,
        /// HTTP proxy URL.
        proxy: Option<String>,
        /// Additional HTTP headers to send with every request.
        headers: Option<HashMap<String, String>>,
    },
}

impl Default for TransportOptions {
    fn default() -> Self {
        TransportOptions::Http {
            timeout: Some(DEFAULT_TIMEOUT),
            proxy: None,
            headers: None,
        }
    }
}

impl TransportOptions {
    /// Create new default HTTP transport options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, duration: Duration) -> Self {
        match &mut self {
            TransportOptions::Http { timeout, .. } => *timeout = Some(duration),
        }
        self
    }

    /// Set the proxy.
    pub fn with_proxy(mut self, proxy_url: String) -> Self {
        match &mut self {
            TransportOptions::Http { proxy, .. } => *proxy = Some(proxy_url),
        }
        self
    }

    /// Add a header.
    pub fn with_header(mut self, key: String, value: String) -> Self {
        match &mut self {
            TransportOptions::Http { headers, .. } => {
                headers.get_or_insert_with(HashMap::new).insert(key, value);
            }
        }
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        match self {
            TransportOptions::Http { timeout, .. } => *timeout,
        }
    }
}
