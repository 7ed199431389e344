//! Process configuration, resolved once at the binary edge.
//!
//! Library code never reads the environment; binaries call
//! [`Config::from_env`] and pass the pieces into constructors.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use crate::analyzer::BodyAnalyzer;
use crate::client::AnalysisError;
use crate::options::{ModelOptions, TransportOptions, DEFAULT_TIMEOUT};
use crate::prompt::PromptLanguage;
use crate::providers::{OpenAi, Provider};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const MODEL_ENV: &str = "SCANFIT_MODEL";
pub const TIMEOUT_ENV: &str = "SCANFIT_TIMEOUT_SECS";
pub const LANGUAGE_ENV: &str = "SCANFIT_LANGUAGE";
pub const BIND_ADDR_ENV: &str = "SCANFIT_BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Invalid process configuration, reported at startup.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{env} must be a positive number of seconds, got '{0}'", env = TIMEOUT_ENV)]
    InvalidTimeout(String),

    #[error("{env}: {0}", env = LANGUAGE_ENV)]
    InvalidLanguage(String),

    #[error("{env} is not a valid address: '{0}'", env = BIND_ADDR_ENV)]
    InvalidBindAddr(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Absent keys are allowed; requests then fail with a configuration error.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: String,
    pub timeout: Duration,
    pub language: PromptLanguage,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let timeout = match get(TIMEOUT_ENV) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?,
            None => DEFAULT_TIMEOUT,
        };

        let language = match get(LANGUAGE_ENV) {
            Some(raw) => raw
                .parse::<PromptLanguage>()
                .map_err(ConfigError::InvalidLanguage)?,
            None => PromptLanguage::default(),
        };

        let bind_raw = get(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_raw.clone()))?;

        Ok(Self {
            api_key: get(API_KEY_ENV),
            base_url: get(BASE_URL_ENV),
            model: get(MODEL_ENV).unwrap_or_else(|| OpenAi::default_model().to_string()),
            timeout,
            language,
            bind_addr,
        })
    }

    pub fn model_options(&self) -> ModelOptions {
        ModelOptions::new(self.model.clone()).with_language(self.language)
    }

    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions::new().with_timeout(self.timeout)
    }

    /// Wire the configured credential and options into a ready analyzer.
    pub fn build_analyzer(&self) -> Result<BodyAnalyzer, AnalysisError> {
        let gateway = OpenAi::create_with_options(
            self.api_key.clone(),
            self.base_url.clone(),
            &self.transport_options(),
        )?;
        Ok(BodyAnalyzer::new(gateway, self.model_options()))
    }
}
