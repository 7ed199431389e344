//! The body-analysis pipeline.
//!
//! `BodyAnalyzer` runs every stage in order:
//! 1. Validates photos and user data
//! 2. Computes BMI locally
//! 3. Builds the prompt and assembles the vision request
//! 4. Sends it through the gateway (one attempt)
//! 5. Normalizes the reply and stamps the local BMI
//!
//! # Example
//! ```no_run
//! use scanfit::analyzer::BodyAnalyzer;
//! use scanfit::model::{Gender, Goal, UserData, UserPhotos};
//! use scanfit::options::{ModelOptions, TransportOptions};
//! use scanfit::providers::{OpenAi, Provider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = OpenAi::create_with_options(
//!         std::env::var("OPENAI_API_KEY").ok(),
//!         None,
//!         &TransportOptions::default(),
//!     )?;
//!     let analyzer = BodyAnalyzer::new(gateway, ModelOptions::default());
//!
//!     let photos = UserPhotos::from_files("front.jpg", "back.jpg", "right.jpg", "left.jpg")?;
//!     let user = UserData::new(Gender::Female, 28, 60.0, 165.0, Goal::FatLoss);
//!
//!     let analysis = analyzer.analyze(photos, user).await?;
//!     println!("{}", serde_json::to_string_pretty(&analysis)?);
//!     Ok(())
//! }
//! ```

use tracing::{info, Instrument};
use uuid::Uuid;

use crate::api::openai::{assemble_vision_request, ChatRequest};
use crate::bmi::calculate_bmi;
use crate::client::{AnalysisError, Transport};
use crate::gateway::AnalysisGateway;
use crate::http::HttpTransport;
use crate::model::{BodyAnalysis, UserData, UserPhotos};
use crate::normalize::normalize;
use crate::options::ModelOptions;
use crate::prompt::build_prompt;

/// A request ready to send, with the BMI it was built from.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub bmi: f64,
    pub request: ChatRequest,
}

pub struct BodyAnalyzer<T = HttpTransport> {
    gateway: AnalysisGateway<T>,
    model_options: ModelOptions,
}

impl<T: Transport> BodyAnalyzer<T> {
    pub fn new(gateway: AnalysisGateway<T>, model_options: ModelOptions) -> Self {
        Self {
            gateway,
            model_options,
        }
    }

    pub fn gateway(&self) -> &AnalysisGateway<T> {
        &self.gateway
    }

    pub fn model_options(&self) -> &ModelOptions {
        &self.model_options
    }

    /// Validate inputs and build the outbound request without sending it.
    pub fn prepare(
        &self,
        photos: &UserPhotos,
        user_data: &UserData,
    ) -> Result<PreparedRequest, AnalysisError> {
        photos.validate()?;
        user_data.validate()?;

        let bmi = calculate_bmi(user_data.height, user_data.weight);
        let prompt = build_prompt(user_data, bmi, self.model_options.language);
        let request = assemble_vision_request(prompt, photos, &self.model_options);

        Ok(PreparedRequest { bmi, request })
    }

    /// Run the full pipeline for one submission.
    pub async fn analyze(
        &self,
        photos: UserPhotos,
        user_data: UserData,
    ) -> Result<BodyAnalysis, AnalysisError> {
        let analysis_id = Uuid::new_v4();
        let span = tracing::info_span!("body_analysis", %analysis_id, goal = %user_data.goal);

        async move {
            let PreparedRequest { bmi, request } = self.prepare(&photos, &user_data)?;
            info!(bmi, model = %request.model, "Requesting body analysis");

            let raw = self.gateway.send(&request).await?;
            let analysis = normalize(&raw, bmi)?;

            info!(
                body_fat = analysis.body_fat_percentage,
                body_type = %analysis.body_type,
                recommendations = analysis.recommendations.len(),
                "Body analysis complete"
            );
            Ok::<_, AnalysisError>(analysis)
        }
        .instrument(span)
        .await
    }
}
