//! Body Mass Index.

/// BMI from height in centimetres and weight in kilograms, rounded to one decimal.
///
/// Callers are expected to have validated `height_cm > 0`; a zero height yields
/// a non-finite value rather than an error.
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round_one_decimal(weight_kg / (height_m * height_m))
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
