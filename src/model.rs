//! Input and output types of the body-analysis pipeline.
//!
//! Field names serialize in camelCase so the same values can be exchanged
//! with browser clients without an extra mapping layer.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;

use crate::client::AnalysisError;

/// The four body views, in the order they are sent to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoView {
    Front,
    Back,
    SideRight,
    SideLeft,
}

impl PhotoView {
    /// Fixed request order. The prompt refers to the photos by this order.
    pub const ORDER: [PhotoView; 4] = [
        PhotoView::Front,
        PhotoView::Back,
        PhotoView::SideRight,
        PhotoView::SideLeft,
    ];

    /// Wire name of the view, as used in the inbound JSON.
    pub fn key(self) -> &'static str {
        match self {
            PhotoView::Front => "front",
            PhotoView::Back => "back",
            PhotoView::SideRight => "sideRight",
            PhotoView::SideLeft => "sideLeft",
        }
    }
}

/// Four image references, each an opaque encoded payload (usually a data URI).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPhotos {
    #[serde(default)]
    pub front: String,
    #[serde(default)]
    pub back: String,
    #[serde(default)]
    pub side_right: String,
    #[serde(default)]
    pub side_left: String,
}

impl UserPhotos {
    pub fn new(
        front: impl Into<String>,
        back: impl Into<String>,
        side_right: impl Into<String>,
        side_left: impl Into<String>,
    ) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            side_right: side_right.into(),
            side_left: side_left.into(),
        }
    }

    /// Read four image files and encode each one as a base64 data URI.
    pub fn from_files(
        front: impl AsRef<Path>,
        back: impl AsRef<Path>,
        side_right: impl AsRef<Path>,
        side_left: impl AsRef<Path>,
    ) -> std::io::Result<Self> {
        Ok(Self {
            front: read_data_uri(front.as_ref())?,
            back: read_data_uri(back.as_ref())?,
            side_right: read_data_uri(side_right.as_ref())?,
            side_left: read_data_uri(side_left.as_ref())?,
        })
    }

    pub fn get(&self, view: PhotoView) -> &str {
        match view {
            PhotoView::Front => &self.front,
            PhotoView::Back => &self.back,
            PhotoView::SideRight => &self.side_right,
            PhotoView::SideLeft => &self.side_left,
        }
    }

    /// Photos paired with their view, always front, back, right side, left side.
    pub fn ordered(&self) -> [(PhotoView, &str); 4] {
        PhotoView::ORDER.map(|view| (view, self.get(view)))
    }

    /// All four views must carry a payload.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let missing: Vec<&str> = self
            .ordered()
            .iter()
            .filter(|(_, data)| data.trim().is_empty())
            .map(|(view, _)| view.key())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AnalysisError::InputValidation(format!(
                "Missing photos: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Encode raw image bytes as a `data:` URI.
pub fn image_data_uri(bytes: &[u8], mime_type: &str) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        general_purpose::STANDARD.encode(bytes)
    )
}

/// Guess an image MIME type from a file extension, defaulting to JPEG.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

fn read_data_uri(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(image_data_uri(&bytes, mime_for_path(path)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(format!("unknown gender '{other}' (expected male or female)")),
        }
    }
}

/// Training goal. Codes outside the known vocabulary are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Goal {
    MuscleGain,
    FatLoss,
    BodyRecomp,
    Performance,
    Other(String),
}

impl Goal {
    pub fn code(&self) -> &str {
        match self {
            Goal::MuscleGain => "muscle_gain",
            Goal::FatLoss => "fat_loss",
            Goal::BodyRecomp => "body_recomp",
            Goal::Performance => "performance",
            Goal::Other(code) => code,
        }
    }
}

impl From<&str> for Goal {
    fn from(code: &str) -> Self {
        match code {
            "muscle_gain" => Goal::MuscleGain,
            "fat_loss" => Goal::FatLoss,
            "body_recomp" => Goal::BodyRecomp,
            "performance" => Goal::Performance,
            other => Goal::Other(other.to_string()),
        }
    }
}

impl From<String> for Goal {
    fn from(code: String) -> Self {
        match Goal::from(code.as_str()) {
            Goal::Other(_) => Goal::Other(code),
            known => known,
        }
    }
}

impl From<Goal> for String {
    fn from(goal: Goal) -> Self {
        goal.code().to_string()
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FromStr for FitnessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(FitnessLevel::Beginner),
            "intermediate" => Ok(FitnessLevel::Intermediate),
            "advanced" => Ok(FitnessLevel::Advanced),
            other => Err(format!("unknown fitness level '{other}'")),
        }
    }
}

/// Optional body measurements in centimetres.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub arm: Option<f64>,
    pub thigh: Option<f64>,
    pub calf: Option<f64>,
}

impl Measurements {
    /// Present measurements as `(name, cm)` pairs in a stable order.
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        [
            ("chest", self.chest),
            ("waist", self.waist),
            ("hips", self.hips),
            ("arm", self.arm),
            ("thigh", self.thigh),
            ("calf", self.calf),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Biometric data and preferences supplied with the photos.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub gender: Gender,
    pub age: u32,
    /// Kilograms.
    pub weight: f64,
    /// Centimetres.
    pub height: f64,
    pub goal: Goal,
    pub fitness_level: Option<FitnessLevel>,
    pub weekly_workouts: Option<u32>,
    pub measurements: Option<Measurements>,
}

impl UserData {
    pub fn new(gender: Gender, age: u32, weight: f64, height: f64, goal: Goal) -> Self {
        Self {
            gender,
            age,
            weight,
            height,
            goal,
            fitness_level: None,
            weekly_workouts: None,
            measurements: None,
        }
    }

    /// Check the mandatory numeric fields and any measurements that were given.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.age == 0 {
            return Err(AnalysisError::InputValidation(
                "Age must be a positive number of years".to_string(),
            ));
        }
        if !is_positive(self.weight) {
            return Err(AnalysisError::InputValidation(
                "Weight must be a positive number of kilograms".to_string(),
            ));
        }
        if !is_positive(self.height) {
            return Err(AnalysisError::InputValidation(
                "Height must be a positive number of centimetres".to_string(),
            ));
        }
        if let Some(measurements) = &self.measurements {
            if let Some((name, _)) = measurements
                .entries()
                .into_iter()
                .find(|(_, value)| !is_positive(*value))
            {
                return Err(AnalysisError::InputValidation(format!(
                    "Measurement '{name}' must be a positive number of centimetres"
                )));
            }
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Body types the prompt asks the model to choose from, in both prompt languages.
pub const KNOWN_BODY_TYPES: [&str; 8] = [
    "ectomorph",
    "mesomorph",
    "endomorph",
    "mixed",
    "ectomorfo",
    "mesomorfo",
    "endomorfo",
    "misto",
];

/// Structured assessment returned by the pipeline.
///
/// `bmi` is always the locally computed value. Keys the model returned beyond
/// the expected ones are kept in `extra` and serialized alongside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyAnalysis {
    pub body_fat_percentage: f64,
    pub bmi: f64,
    pub body_type: String,
    pub muscle_mass_estimate: String,
    pub recommendations: Vec<String>,
    pub detailed_analysis: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BodyAnalysis {
    /// Advisory notes for values outside their documented ranges.
    ///
    /// Nothing is clamped; callers decide what to do with these.
    pub fn range_notes(&self) -> Vec<String> {
        let mut notes = Vec::new();

        if !(5.0..=50.0).contains(&self.body_fat_percentage) {
            notes.push(format!(
                "bodyFatPercentage {} is outside 5-50",
                self.body_fat_percentage
            ));
        }

        let count = self.recommendations.len();
        if !(3..=5).contains(&count) {
            notes.push(format!("{count} recommendations (expected 3-5)"));
        }

        let body_type = self.body_type.trim().to_ascii_lowercase();
        if !KNOWN_BODY_TYPES.iter().any(|known| body_type.contains(known)) {
            notes.push(format!("unrecognized body type '{}'", self.body_type));
        }

        notes
    }
}
