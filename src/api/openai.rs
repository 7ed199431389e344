//! OpenAI Chat Completions wire types and vision request assembly.
//!
//! See: <https://platform.openai.com/docs/api-reference/chat>

use serde::{Deserialize, Serialize};

use crate::model::UserPhotos;
use crate::options::ModelOptions;

/// Build the single-message vision request: the prompt followed by the four
/// photos in front, back, right side, left side order.
pub fn assemble_vision_request(
    prompt: String,
    photos: &UserPhotos,
    model_options: &ModelOptions,
) -> ChatRequest {
    let mut content = Vec::with_capacity(5);
    content.push(ContentPart::text(prompt));
    content.extend(
        photos
            .ordered()
            .into_iter()
            .map(|(_, url)| ContentPart::image_url(url)),
    );

    ChatRequest {
        model: model_options.model.clone(),
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content,
        }],
        temperature: model_options.temperature,
        top_p: model_options.top_p,
        max_tokens: model_options.max_tokens,
        response_format: Some(ResponseFormat::json_object()),
    }
}

// --- Chat Completions API Types ---

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<u32>,
    pub response_format: Option<ResponseFormat>,
}

impl ChatRequest {
    /// Image URLs of the request, in the order they are sent.
    pub fn image_urls(&self) -> Vec<&str> {
        self.messages
            .iter()
            .flat_map(|m| m.content.iter())
            .filter_map(|part| match part {
                ContentPart::ImageUrl { image_url } => Some(image_url.url.as_str()),
                ContentPart::Text { .. } => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    /// Structured-output mode: the reply must be a single JSON object.
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
    pub usage: Option<ChatUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponseMessage {
    pub content: Option<String>,
    pub refusal: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatErrorResponse {
    pub error: ChatError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatError {
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub message: String,
}
