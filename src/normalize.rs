//! Parsing and normalization of the model's JSON reply.
//!
//! Model output is untrusted. A reply is either a well-shaped analysis, a JSON
//! object with missing or mistyped fields (kept, with defaults filled in), or
//! not a JSON object at all.

use std::fmt;

use serde_json::{Map, Value};
use tracing::warn;

use crate::client::AnalysisError;
use crate::model::BodyAnalysis;
use crate::prompt::{
    BODY_FAT_PERCENTAGE, BODY_TYPE, DETAILED_ANALYSIS, MUSCLE_MASS_ESTIMATE, RECOMMENDATIONS,
};

/// The key the model must not be trusted for.
const BMI_KEY: &str = "bmi";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    WrongType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub problem: FieldProblem,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.problem {
            FieldProblem::Missing => write!(f, "{} missing", self.field),
            FieldProblem::WrongType => write!(f, "{} has an unexpected type", self.field),
        }
    }
}

/// Result of reading the raw reply text.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// Every expected field was present with the expected type.
    Valid(BodyAnalysis),
    /// A JSON object, but some expected fields were absent or mistyped and
    /// have been defaulted.
    Incomplete {
        analysis: BodyAnalysis,
        issues: Vec<FieldIssue>,
    },
    /// Not a JSON object.
    Unparsable(String),
}

/// Classify the raw reply. The returned analysis carries `bmi = 0.0`; callers
/// set the locally computed value.
pub fn parse_analysis(raw: &str) -> ParseOutcome {
    let mut object = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            return ParseOutcome::Unparsable(format!("expected a JSON object, got {}", kind(&other)))
        }
        Err(e) => return ParseOutcome::Unparsable(e.to_string()),
    };

    object.remove(BMI_KEY);

    let mut issues = Vec::new();
    let body_fat_percentage = take_number(&mut object, BODY_FAT_PERCENTAGE, &mut issues);
    let body_type = take_text(&mut object, BODY_TYPE, &mut issues);
    let muscle_mass_estimate = take_text(&mut object, MUSCLE_MASS_ESTIMATE, &mut issues);
    let recommendations = take_list(&mut object, RECOMMENDATIONS, &mut issues);
    let detailed_analysis = take_text(&mut object, DETAILED_ANALYSIS, &mut issues);

    let analysis = BodyAnalysis {
        body_fat_percentage,
        bmi: 0.0,
        body_type,
        muscle_mass_estimate,
        recommendations,
        detailed_analysis,
        extra: object,
    };

    if issues.is_empty() {
        ParseOutcome::Valid(analysis)
    } else {
        ParseOutcome::Incomplete { analysis, issues }
    }
}

/// Parse the reply and stamp it with the locally computed BMI.
///
/// Only an unparsable reply is an error; incomplete replies are accepted with
/// defaulted fields.
pub fn normalize(raw: &str, bmi: f64) -> Result<BodyAnalysis, AnalysisError> {
    let mut analysis = match parse_analysis(raw) {
        ParseOutcome::Valid(analysis) => analysis,
        ParseOutcome::Incomplete { analysis, issues } => {
            let summary: Vec<String> = issues.iter().map(ToString::to_string).collect();
            warn!("Model reply is incomplete: {}", summary.join("; "));
            analysis
        }
        ParseOutcome::Unparsable(reason) => {
            warn!("Model reply is not a JSON object: {}", reason);
            return Err(AnalysisError::MalformedResponse(reason));
        }
    };

    analysis.bmi = bmi;

    for note in analysis.range_notes() {
        warn!("Out-of-range value accepted as-is: {}", note);
    }

    Ok(analysis)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn take_number(
    object: &mut Map<String, Value>,
    field: &'static str,
    issues: &mut Vec<FieldIssue>,
) -> f64 {
    match object.remove(field) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
        // Models sometimes answer "18%" or "18.5".
        Some(Value::String(s)) => match s.trim().trim_end_matches('%').trim().parse::<f64>() {
            Ok(n) => n,
            Err(_) => {
                issues.push(FieldIssue { field, problem: FieldProblem::WrongType });
                0.0
            }
        },
        Some(Value::Null) | None => {
            issues.push(FieldIssue { field, problem: FieldProblem::Missing });
            0.0
        }
        Some(_) => {
            issues.push(FieldIssue { field, problem: FieldProblem::WrongType });
            0.0
        }
    }
}

fn take_text(
    object: &mut Map<String, Value>,
    field: &'static str,
    issues: &mut Vec<FieldIssue>,
) -> String {
    match object.remove(field) {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => {
            issues.push(FieldIssue { field, problem: FieldProblem::Missing });
            String::new()
        }
        Some(_) => {
            issues.push(FieldIssue { field, problem: FieldProblem::WrongType });
            String::new()
        }
    }
}

fn take_list(
    object: &mut Map<String, Value>,
    field: &'static str,
    issues: &mut Vec<FieldIssue>,
) -> Vec<String> {
    match object.remove(field) {
        Some(Value::Array(items)) => {
            let total = items.len();
            let texts: Vec<String> = items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect();
            if texts.len() != total {
                issues.push(FieldIssue { field, problem: FieldProblem::WrongType });
            }
            texts
        }
        Some(Value::String(s)) => vec![s],
        Some(Value::Null) | None => {
            issues.push(FieldIssue { field, problem: FieldProblem::Missing });
            Vec::new()
        }
        Some(_) => {
            issues.push(FieldIssue { field, problem: FieldProblem::WrongType });
            Vec::new()
        }
    }
}
