use scanfit::model::{FitnessLevel, Gender, Goal, Measurements, UserData};
use scanfit::prompt::{build_prompt, goal_description, PromptLanguage, RESPONSE_KEYS};

fn user(goal: Goal) -> UserData {
    UserData::new(Gender::Female, 28, 60.0, 165.0, goal)
}

#[test]
fn test_goal_table_english() {
    let en = PromptLanguage::English;
    assert_eq!(goal_description(&Goal::MuscleGain, en), "Build muscle mass");
    assert_eq!(goal_description(&Goal::FatLoss, en), "Lose body fat");
    assert_eq!(
        goal_description(&Goal::BodyRecomp, en),
        "Body recomposition (get leaner)"
    );
    assert_eq!(
        goal_description(&Goal::Performance, en),
        "Improve athletic performance"
    );
}

#[test]
fn test_goal_table_portuguese() {
    let pt = PromptLanguage::Portuguese;
    assert_eq!(goal_description(&Goal::MuscleGain, pt), "Ganhar massa muscular");
    assert_eq!(goal_description(&Goal::FatLoss, pt), "Perder gordura");
    assert_eq!(
        goal_description(&Goal::BodyRecomp, pt),
        "Recomposição corporal (definir)"
    );
    assert_eq!(
        goal_description(&Goal::Performance, pt),
        "Melhorar desempenho esportivo"
    );
}

#[test]
fn test_unknown_goal_passes_through() {
    let goal = Goal::from("marathon_prep");
    assert_eq!(goal, Goal::Other("marathon_prep".to_string()));

    for language in [PromptLanguage::English, PromptLanguage::Portuguese] {
        assert_eq!(goal_description(&goal, language), "marathon_prep");
        let prompt = build_prompt(&user(goal.clone()), 22.0, language);
        assert!(prompt.contains(": marathon_prep\n"));
    }
}

#[test]
fn test_prompt_contains_user_data() {
    let prompt = build_prompt(&user(Goal::FatLoss), 22.0, PromptLanguage::English);

    assert!(prompt.starts_with("You are a professional body-composition analyst"));
    assert!(prompt.contains("- Gender: Female"));
    assert!(prompt.contains("- Age: 28 years"));
    assert!(prompt.contains("- Weight: 60 kg"));
    assert!(prompt.contains("- Height: 165 cm"));
    assert!(prompt.contains("- BMI: 22.0"));
    assert!(prompt.contains("- Goal: Lose body fat"));
}

#[test]
fn test_prompt_has_five_numbered_instructions() {
    let prompt = build_prompt(&user(Goal::MuscleGain), 22.0, PromptLanguage::English);

    for n in 1..=5 {
        assert!(prompt.contains(&format!("\n{n}. ")), "instruction {n} missing");
    }
    assert!(!prompt.contains("\n6. "));
    assert!(prompt.contains("ectomorph, mesomorph, endomorph or mixed"));
    assert!(prompt.contains("3-5 specific recommendations"));
}

#[test]
fn test_prompt_demands_every_response_key() {
    for language in [PromptLanguage::English, PromptLanguage::Portuguese] {
        let prompt = build_prompt(&user(Goal::Performance), 22.0, language);
        for key in RESPONSE_KEYS {
            assert!(prompt.contains(&format!("\"{key}\":")), "{key} missing");
        }
        assert!(!prompt.contains("\"bmi\""));
        assert!(prompt.trim_end().ends_with('}'));
    }
}

#[test]
fn test_advisory_fields_only_when_present() {
    let bare = build_prompt(&user(Goal::FatLoss), 22.0, PromptLanguage::English);
    assert!(!bare.contains("Fitness level"));
    assert!(!bare.contains("Weekly workouts"));
    assert!(!bare.contains("Measurements"));

    let mut detailed = user(Goal::FatLoss);
    detailed.fitness_level = Some(FitnessLevel::Intermediate);
    detailed.weekly_workouts = Some(4);
    detailed.measurements = Some(Measurements {
        waist: Some(70.0),
        hips: Some(96.5),
        ..Default::default()
    });

    let prompt = build_prompt(&detailed, 22.0, PromptLanguage::English);
    assert!(prompt.contains("- Fitness level: Intermediate"));
    assert!(prompt.contains("- Weekly workouts: 4"));
    assert!(prompt.contains("- Measurements: waist 70 cm, hips 96.5 cm"));
}

#[test]
fn test_empty_measurements_are_omitted() {
    let mut data = user(Goal::FatLoss);
    data.measurements = Some(Measurements::default());

    let prompt = build_prompt(&data, 22.0, PromptLanguage::English);
    assert!(!prompt.contains("Measurements"));
}

#[test]
fn test_portuguese_prompt() {
    let mut data = UserData::new(Gender::Male, 35, 82.5, 180.0, Goal::BodyRecomp);
    data.measurements = Some(Measurements {
        arm: Some(38.0),
        ..Default::default()
    });

    let prompt = build_prompt(&data, 25.5, PromptLanguage::Portuguese);
    assert!(prompt.contains("- Sexo: Masculino"));
    assert!(prompt.contains("- Idade: 35 anos"));
    assert!(prompt.contains("- Peso: 82.5 kg"));
    assert!(prompt.contains("- IMC: 25.5"));
    assert!(prompt.contains("- Objetivo: Recomposição corporal (definir)"));
    assert!(prompt.contains("- Medidas: braço 38 cm"));
    assert!(prompt.contains("Responda APENAS em formato JSON válido:"));
}

#[test]
fn test_language_parsing() {
    assert_eq!("en".parse(), Ok(PromptLanguage::English));
    assert_eq!("pt-BR".parse(), Ok(PromptLanguage::Portuguese));
    assert!("fr".parse::<PromptLanguage>().is_err());
}
