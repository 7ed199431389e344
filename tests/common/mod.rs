#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use std::sync::{Arc, Mutex};

use scanfit::api::openai::ChatRequest;
use scanfit::client::{AnalysisError, Transport, TransportReply};
use scanfit::gateway::AnalysisGateway;
use scanfit::model::{Gender, Goal, UserData, UserPhotos};
use scanfit::options::ModelOptions;
use scanfit::BodyAnalyzer;

pub const TEST_KEY: &str = "sk-test";
pub const TEST_BASE: &str = "https://llm.test";

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub url: String,
    pub api_key: String,
    pub request: ChatRequest,
}

/// Transport double that replays canned replies and records every call.
#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<Vec<TransportReply>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockTransport {
    pub fn new(replies: Vec<TransportReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn replying(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(vec![TransportReply::new(status, body)])
    }

    pub fn with_content(content: &str) -> Self {
        Self::replying(StatusCode::OK, completion(content))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("transport was never called")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(
        &self,
        url: &str,
        api_key: &str,
        body: &ChatRequest,
    ) -> Result<TransportReply, AnalysisError> {
        self.calls.lock().unwrap().push(RecordedCall {
            url: url.to_string(),
            api_key: api_key.to_string(),
            request: body.clone(),
        });
        let mut replies = self.replies.lock().unwrap();
        if !replies.is_empty() {
            Ok(replies.remove(0))
        } else {
            Err(AnalysisError::Provider("No more mock replies".to_string()))
        }
    }
}

/// Chat Completions envelope around `content`.
pub fn completion(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 1200, "completion_tokens": 300 }
    })
    .to_string()
}

pub fn analyzer(transport: MockTransport) -> BodyAnalyzer<MockTransport> {
    analyzer_with_key(Some(TEST_KEY), transport)
}

pub fn analyzer_with_key(key: Option<&str>, transport: MockTransport) -> BodyAnalyzer<MockTransport> {
    let gateway = AnalysisGateway::new(key.map(str::to_string), TEST_BASE, transport);
    BodyAnalyzer::new(gateway, ModelOptions::default())
}

pub fn sample_photos() -> UserPhotos {
    UserPhotos::new(
        "data:image/jpeg;base64,RlJPTlQ=",
        "data:image/jpeg;base64,QkFDSw==",
        "data:image/jpeg;base64,UklHSFQ=",
        "data:image/jpeg;base64,TEVGVA==",
    )
}

pub fn sample_user() -> UserData {
    UserData::new(Gender::Female, 28, 60.0, 165.0, Goal::FatLoss)
}

pub const SAMPLE_REPLY: &str = r#"{"bodyFatPercentage": 24, "bodyType": "mesomorph", "muscleMassEstimate": "moderate", "recommendations": ["a","b","c"], "detailedAnalysis": "..."}"#;
