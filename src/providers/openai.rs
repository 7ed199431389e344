//! OpenAI provider preset.

use crate::options::DEFAULT_MODEL;
use crate::providers::Provider;

pub const OPENAI_API_BASE: &str = "https://api.openai.com";

pub struct OpenAi;

impl Provider for OpenAi {
    fn default_api_base() -> &'static str {
        OPENAI_API_BASE
    }

    fn default_model() -> &'static str {
        DEFAULT_MODEL
    }
}
