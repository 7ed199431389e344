//! Prompt construction for the body-composition request.
//!
//! The prompt is the contract with the model: the JSON keys it demands are the
//! keys `normalize` reads back, and both sides use the constants below.

use std::borrow::Cow;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::model::{FitnessLevel, Gender, Goal, UserData};

pub const BODY_FAT_PERCENTAGE: &str = "bodyFatPercentage";
pub const BODY_TYPE: &str = "bodyType";
pub const MUSCLE_MASS_ESTIMATE: &str = "muscleMassEstimate";
pub const RECOMMENDATIONS: &str = "recommendations";
pub const DETAILED_ANALYSIS: &str = "detailedAnalysis";

/// Keys of the JSON object the model must reply with, in prompt order.
pub const RESPONSE_KEYS: [&str; 5] = [
    BODY_FAT_PERCENTAGE,
    BODY_TYPE,
    MUSCLE_MASS_ESTIMATE,
    RECOMMENDATIONS,
    DETAILED_ANALYSIS,
];

/// Language the instruction block is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptLanguage {
    #[default]
    English,
    Portuguese,
}

impl FromStr for PromptLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "english" => Ok(PromptLanguage::English),
            "pt" | "pt-br" | "portuguese" => Ok(PromptLanguage::Portuguese),
            other => Err(format!("unsupported prompt language '{other}'")),
        }
    }
}

/// Fixed wording for one prompt language.
struct Vocabulary {
    intro: &'static str,
    user_data_heading: &'static str,
    gender_label: &'static str,
    male: &'static str,
    female: &'static str,
    age_label: &'static str,
    years: &'static str,
    weight_label: &'static str,
    height_label: &'static str,
    bmi_label: &'static str,
    goal_label: &'static str,
    fitness_level_label: &'static str,
    fitness_levels: [&'static str; 3],
    weekly_workouts_label: &'static str,
    measurements_label: &'static str,
    measurement_names: [(&'static str, &'static str); 6],
    goals: [(&'static str, &'static str); 4],
    instructions_heading: &'static str,
    instructions: [&'static str; 5],
    format_heading: &'static str,
    key_hints: [&'static str; 5],
}

static ENGLISH: Vocabulary = Vocabulary {
    intro: "You are a professional body-composition analyst and fitness specialist. \
            Analyze these 4 photos of a person's body (in order: front, back, right side, left side) \
            and provide a detailed professional assessment.",
    user_data_heading: "USER DATA:",
    gender_label: "Gender",
    male: "Male",
    female: "Female",
    age_label: "Age",
    years: "years",
    weight_label: "Weight",
    height_label: "Height",
    bmi_label: "BMI",
    goal_label: "Goal",
    fitness_level_label: "Fitness level",
    fitness_levels: ["Beginner", "Intermediate", "Advanced"],
    weekly_workouts_label: "Weekly workouts",
    measurements_label: "Measurements",
    measurement_names: [
        ("chest", "chest"),
        ("waist", "waist"),
        ("hips", "hips"),
        ("arm", "arm"),
        ("thigh", "thigh"),
        ("calf", "calf"),
    ],
    goals: [
        ("muscle_gain", "Build muscle mass"),
        ("fat_loss", "Lose body fat"),
        ("body_recomp", "Body recomposition (get leaner)"),
        ("performance", "Improve athletic performance"),
    ],
    instructions_heading: "INSTRUCTIONS:",
    instructions: [
        "Estimate the body fat percentage (be realistic and precise)",
        "Identify the body type (ectomorph, mesomorph, endomorph or mixed)",
        "Estimate the current muscle mass (low, moderate, good, excellent)",
        "Provide 3-5 specific recommendations based on the goal",
        "Write a detailed analysis of the body composition in 2-3 paragraphs",
    ],
    format_heading: "Respond ONLY with valid JSON in this format:",
    key_hints: [
        "number between 5 and 50",
        "\"identified body type\"",
        "\"description of the muscle mass\"",
        "[\"recommendation 1\", \"recommendation 2\", ...]",
        "\"detailed analysis in 2-3 paragraphs\"",
    ],
};

static PORTUGUESE: Vocabulary = Vocabulary {
    intro: "Você é um analista profissional de composição corporal e especialista em fitness. \
            Analise estas 4 fotos do corpo de uma pessoa (na ordem: frente, costas, lado direito, lado esquerdo) \
            e forneça uma avaliação profissional detalhada.",
    user_data_heading: "DADOS DO USUÁRIO:",
    gender_label: "Sexo",
    male: "Masculino",
    female: "Feminino",
    age_label: "Idade",
    years: "anos",
    weight_label: "Peso",
    height_label: "Altura",
    bmi_label: "IMC",
    goal_label: "Objetivo",
    fitness_level_label: "Nível de condicionamento",
    fitness_levels: ["Iniciante", "Intermediário", "Avançado"],
    weekly_workouts_label: "Treinos por semana",
    measurements_label: "Medidas",
    measurement_names: [
        ("chest", "peito"),
        ("waist", "cintura"),
        ("hips", "quadril"),
        ("arm", "braço"),
        ("thigh", "coxa"),
        ("calf", "panturrilha"),
    ],
    goals: [
        ("muscle_gain", "Ganhar massa muscular"),
        ("fat_loss", "Perder gordura"),
        ("body_recomp", "Recomposição corporal (definir)"),
        ("performance", "Melhorar desempenho esportivo"),
    ],
    instructions_heading: "INSTRUÇÕES:",
    instructions: [
        "Estime o percentual de gordura corporal (seja realista e preciso)",
        "Identifique o tipo corporal (ectomorfo, mesomorfo, endomorfo ou misto)",
        "Estime a massa muscular atual (baixa, moderada, boa, excelente)",
        "Forneça 3-5 recomendações específicas baseadas no objetivo",
        "Faça uma análise detalhada da composição corporal em 2-3 parágrafos",
    ],
    format_heading: "Responda APENAS em formato JSON válido:",
    key_hints: [
        "número entre 5 e 50",
        "\"tipo corporal identificado\"",
        "\"descrição da massa muscular\"",
        "[\"recomendação 1\", \"recomendação 2\", ...]",
        "\"análise detalhada em 2-3 parágrafos\"",
    ],
};

fn vocabulary(language: PromptLanguage) -> &'static Vocabulary {
    match language {
        PromptLanguage::English => &ENGLISH,
        PromptLanguage::Portuguese => &PORTUGUESE,
    }
}

/// Display phrase for a goal code. Unknown codes are returned unchanged.
pub fn goal_description(goal: &Goal, language: PromptLanguage) -> Cow<'_, str> {
    let code = goal.code();
    vocabulary(language)
        .goals
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, phrase)| Cow::Borrowed(*phrase))
        .unwrap_or(Cow::Borrowed(code))
}

/// Build the full instruction block sent alongside the four photos.
pub fn build_prompt(user: &UserData, bmi: f64, language: PromptLanguage) -> String {
    let vocab = vocabulary(language);

    let gender = match user.gender {
        Gender::Male => vocab.male,
        Gender::Female => vocab.female,
    };

    let mut data_lines = vec![
        format!("- {}: {}", vocab.gender_label, gender),
        format!("- {}: {} {}", vocab.age_label, user.age, vocab.years),
        format!("- {}: {} kg", vocab.weight_label, user.weight),
        format!("- {}: {} cm", vocab.height_label, user.height),
        format!("- {}: {:.1}", vocab.bmi_label, bmi),
        format!(
            "- {}: {}",
            vocab.goal_label,
            goal_description(&user.goal, language)
        ),
    ];

    if let Some(level) = user.fitness_level {
        let label = match level {
            FitnessLevel::Beginner => vocab.fitness_levels[0],
            FitnessLevel::Intermediate => vocab.fitness_levels[1],
            FitnessLevel::Advanced => vocab.fitness_levels[2],
        };
        data_lines.push(format!("- {}: {}", vocab.fitness_level_label, label));
    }

    if let Some(workouts) = user.weekly_workouts {
        data_lines.push(format!("- {}: {}", vocab.weekly_workouts_label, workouts));
    }

    if let Some(measurements) = user.measurements.as_ref().filter(|m| !m.is_empty()) {
        let listed = measurements
            .entries()
            .into_iter()
            .map(|(name, cm)| format!("{} {} cm", localized_measurement(vocab, name), cm))
            .join(", ");
        data_lines.push(format!("- {}: {}", vocab.measurements_label, listed));
    }

    let instructions = vocab
        .instructions
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{}. {}", i + 1, line))
        .join("\n");

    let format_body = RESPONSE_KEYS
        .iter()
        .zip(vocab.key_hints.iter())
        .map(|(key, hint)| format!("  \"{key}\": {hint}"))
        .join(",\n");

    format!(
        "{intro}\n\n{data_heading}\n{data}\n\n{instr_heading}\n{instructions}\n\n{format_heading}\n{{\n{format_body}\n}}",
        intro = vocab.intro,
        data_heading = vocab.user_data_heading,
        data = data_lines.join("\n"),
        instr_heading = vocab.instructions_heading,
        format_heading = vocab.format_heading,
    )
}

fn localized_measurement(vocab: &Vocabulary, name: &str) -> &'static str {
    vocab
        .measurement_names
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, local)| *local)
        .unwrap_or("?")
}
