//! HTTP entry point for browser clients.
//!
//! `POST /api/analyze-body` accepts `{ photos, userData }` and answers with a
//! `BodyAnalysis` or `{ "error": "..." }`. `GET /health` reports whether a
//! provider credential is configured.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use crate::analyzer::BodyAnalyzer;
use crate::client::{AnalysisError, ErrorCategory, Transport};
use crate::model::{BodyAnalysis, UserData, UserPhotos};

/// Four base64 photos easily exceed axum's 2 MB default.
pub const MAX_BODY_BYTES: usize = 40 * 1024 * 1024;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeBodyRequest {
    pub photos: Option<UserPhotos>,
    pub user_data: Option<UserData>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Analysis failure rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AnalysisError);

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        match self.0.category() {
            ErrorCategory::Input => warn!("Rejected analysis request: {}", self.0),
            ErrorCategory::Setup => error!("Analysis service misconfigured: {}", self.0),
            ErrorCategory::Transient | ErrorCategory::Failure => {
                error!("Analysis failed: {}", self.0)
            }
        }

        (
            status,
            Json(ErrorResponse {
                error: self.0.user_message(),
            }),
        )
            .into_response()
    }
}

pub fn router<T: Transport + 'static>(analyzer: Arc<BodyAnalyzer<T>>) -> Router {
    Router::new()
        .route("/api/analyze-body", post(analyze_body::<T>))
        .route("/health", get(health::<T>))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(analyzer)
}

pub async fn serve<T: Transport + 'static>(
    addr: SocketAddr,
    analyzer: Arc<BodyAnalyzer<T>>,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(analyzer)).await
}

async fn analyze_body<T: Transport + 'static>(
    State(analyzer): State<Arc<BodyAnalyzer<T>>>,
    payload: Result<Json<AnalyzeBodyRequest>, JsonRejection>,
) -> Result<Json<BodyAnalysis>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        AnalysisError::InputValidation(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let (Some(photos), Some(user_data)) = (payload.photos, payload.user_data) else {
        return Err(AnalysisError::InputValidation(
            "Incomplete data: photos and userData are required".to_string(),
        )
        .into());
    };

    let analysis = analyzer.analyze(photos, user_data).await?;
    Ok(Json(analysis))
}

async fn health<T: Transport + 'static>(
    State(analyzer): State<Arc<BodyAnalyzer<T>>>,
) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "credentialConfigured": analyzer.gateway().has_credential(),
    }))
}
