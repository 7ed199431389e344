//! # scanfit - body-composition analysis from photos
//!
//! Collects four body photos plus biometric data, forwards them to a
//! vision-capable chat model, and returns a structured assessment.
//! Body-fat estimation and recommendations come from the model; this crate
//! owns the request/response adapter around that single call.
//!
//! ## Architecture
//!
//! The pipeline is built from small stages, leaves first:
//!
//! 1. **BMI** (`bmi`): height and weight to BMI, one decimal.
//! 2. **Prompt** (`prompt`): instruction block and the demanded JSON keys.
//! 3. **Assembler** (`api::openai`): one text part plus four image parts.
//! 4. **Gateway** (`gateway`): one outbound call, errors classified by status.
//! 5. **Normalizer** (`normalize`): tolerant parse, local BMI stamped in.
//!
//! `BodyAnalyzer` (`analyzer`) runs them in order and is shared by the HTTP
//! server (`server`) and the command-line binary.
//!
//! ### Core Types
//!
//! - **`UserPhotos`** / **`UserData`**: pipeline inputs.
//! - **`BodyAnalysis`**: pipeline output.
//! - **`AnalysisError`**: every failure, with a user-facing message.
//! - **`Transport`**: the network seam; swap it for a test double.
//!
//! ## Example
//! ```no_run
//! use scanfit::providers::{OpenAi, Provider};
//! use scanfit::model::{Gender, Goal, UserData, UserPhotos};
//! use scanfit::options::ModelOptions;
//! use scanfit::BodyAnalyzer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = OpenAi::create(Some("your-api-key".to_string()))?;
//!     let analyzer = BodyAnalyzer::new(gateway, ModelOptions::default());
//!
//!     let photos = UserPhotos::new(
//!         "data:image/jpeg;base64,...",
//!         "data:image/jpeg;base64,...",
//!         "data:image/jpeg;base64,...",
//!         "data:image/jpeg;base64,...",
//!     );
//!     let user = UserData::new(Gender::Male, 30, 70.0, 175.0, Goal::MuscleGain);
//!
//!     let analysis = analyzer.analyze(photos, user).await?;
//!     println!("BMI {} / body fat {}%", analysis.bmi, analysis.body_fat_percentage);
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod api;
pub mod bmi;
pub mod client;
pub mod config;
pub mod gateway;
pub mod http;
pub mod model;
pub mod normalize;
pub mod options;
pub mod prompt;
pub mod providers;
pub mod server;

pub use analyzer::BodyAnalyzer;
pub use client::{AnalysisError, ErrorCategory, Transport, TransportReply};
pub use gateway::AnalysisGateway;
pub use model::{BodyAnalysis, UserData, UserPhotos};
