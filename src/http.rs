//! HTTP transport for the provider endpoint.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::api::openai::ChatRequest;
use crate::client::{AnalysisError, Transport, TransportReply};
use crate::options::TransportOptions;

/// Data URIs longer than this are elided from logged request bodies.
const MAX_LOGGED_DATA_URI: usize = 64;

/// Build a configured HTTP client from transport options.
pub fn build_http_client(transport_options: &TransportOptions) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();

    match transport_options {
        TransportOptions::Http { timeout, proxy, .. } => {
            if let Some(t) = timeout {
                builder = builder.timeout(*t);
            }
            if let Some(proxy_url) = proxy {
                match reqwest::Proxy::all(proxy_url) {
                    Ok(p) => builder = builder.proxy(p),
                    Err(e) => tracing::warn!("Ignoring invalid proxy URL {}: {}", proxy_url, e),
                }
            }
        }
    }

    builder.build()
}

/// Add extra headers to a request if specified in transport options.
pub fn add_extra_headers(
    mut request: RequestBuilder,
    transport_options: &TransportOptions,
) -> RequestBuilder {
    match transport_options {
        TransportOptions::Http { headers, .. } => {
            if let Some(h) = headers {
                for (key, value) in h {
                    request = request.header(key, value);
                }
            }
        }
    }
    request
}

/// Replace long `data:` URIs with a short placeholder so logs stay readable.
pub fn redact_data_uris(value: &mut Value) {
    match value {
        Value::String(s) if s.starts_with("data:") && s.len() > MAX_LOGGED_DATA_URI => {
            let header = s.split(',').next().unwrap_or("data:");
            *s = format!("{},<{} bytes elided>", header, s.len());
        }
        Value::Array(items) => items.iter_mut().for_each(redact_data_uris),
        Value::Object(map) => map.values_mut().for_each(redact_data_uris),
        _ => {}
    }
}

/// Extension trait for RequestBuilder that logs request body.
pub trait RequestBuilderExt {
    /// Set JSON request body and log it with image payloads elided.
    fn json_logged<T: serde::Serialize + ?Sized>(self, json: &T) -> Self;
}

impl RequestBuilderExt for RequestBuilder {
    fn json_logged<T: serde::Serialize + ?Sized>(self, json: &T) -> Self {
        if tracing::enabled!(tracing::Level::DEBUG) {
            if let Ok(mut value) = serde_json::to_value(json) {
                redact_data_uris(&mut value);
                if let Ok(req_body) = serde_json::to_string_pretty(&value) {
                    tracing::debug!("API request body ({} bytes):\n{}", req_body.len(), req_body);
                }
            }
        }

        self.json(json)
    }
}

/// Extension trait for Response that logs response body.
#[async_trait]
pub trait ResponseExt {
    /// Get response text and log it. Consumes the response.
    async fn text_logged(self) -> Result<String, reqwest::Error>;
}

#[async_trait]
impl ResponseExt for reqwest::Response {
    async fn text_logged(self) -> Result<String, reqwest::Error> {
        let text = self.text().await?;
        tracing::debug!("API response ({} bytes):\n{}", text.len(), text);
        Ok(text)
    }
}

/// `Transport` backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    transport_options: TransportOptions,
}

impl HttpTransport {
    pub fn new(transport_options: TransportOptions) -> Result<Self, AnalysisError> {
        let client = build_http_client(&transport_options)?;
        Ok(Self {
            client,
            transport_options,
        })
    }

    pub fn transport_options(&self) -> &TransportOptions {
        &self.transport_options
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        url: &str,
        api_key: &str,
        body: &ChatRequest,
    ) -> Result<TransportReply, AnalysisError> {
        let mut req = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .header(CONTENT_TYPE, "application/json");

        req = add_extra_headers(req, &self.transport_options);

        let response = req.json_logged(body).send().await?;
        let status = response.status();
        let body = response.text_logged().await?;

        Ok(TransportReply { status, body })
    }
}
