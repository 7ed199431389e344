use std::path::Path;

use scanfit::model::{
    image_data_uri, mime_for_path, FitnessLevel, Gender, Goal, PhotoView, UserData, UserPhotos,
};

#[test]
fn test_user_data_from_client_json() {
    let json = r#"{
        "gender": "female",
        "age": 28,
        "weight": 60,
        "height": 165,
        "goal": "fat_loss",
        "fitnessLevel": "beginner",
        "weeklyWorkouts": 3,
        "measurements": { "waist": 72.5 }
    }"#;

    let user: UserData = serde_json::from_str(json).unwrap();

    assert_eq!(user.gender, Gender::Female);
    assert_eq!(user.age, 28);
    assert_eq!(user.weight, 60.0);
    assert_eq!(user.goal, Goal::FatLoss);
    assert_eq!(user.fitness_level, Some(FitnessLevel::Beginner));
    assert_eq!(user.weekly_workouts, Some(3));
    assert_eq!(user.measurements.unwrap().waist, Some(72.5));
}

#[test]
fn test_user_data_requires_mandatory_fields() {
    let json = r#"{"gender": "male", "age": 30, "weight": 70, "goal": "fat_loss"}"#;
    assert!(serde_json::from_str::<UserData>(json).is_err());
}

#[test]
fn test_unknown_goal_round_trips_verbatim() {
    let goal: Goal = serde_json::from_str("\"strength_peak\"").unwrap();
    assert_eq!(goal, Goal::Other("strength_peak".to_string()));
    assert_eq!(serde_json::to_string(&goal).unwrap(), "\"strength_peak\"");
    assert_eq!(serde_json::to_string(&Goal::BodyRecomp).unwrap(), "\"body_recomp\"");
}

#[test]
fn test_user_data_validation() {
    let valid = UserData::new(Gender::Male, 30, 70.0, 175.0, Goal::MuscleGain);
    assert!(valid.validate().is_ok());

    let mut no_age = valid.clone();
    no_age.age = 0;
    assert!(no_age.validate().is_err());

    let mut nan_weight = valid.clone();
    nan_weight.weight = f64::NAN;
    assert!(nan_weight.validate().is_err());

    let mut bad_measurement = valid.clone();
    bad_measurement.measurements = Some(scanfit::model::Measurements {
        calf: Some(-1.0),
        ..Default::default()
    });
    let err = bad_measurement.validate().unwrap_err();
    assert!(err.user_message().contains("calf"));
}

#[test]
fn test_photos_missing_fields_default_to_empty() {
    let photos: UserPhotos = serde_json::from_str(r#"{"front": "F", "back": "B"}"#).unwrap();
    let err = photos.validate().unwrap_err();
    assert_eq!(err.user_message(), "Missing photos: sideRight, sideLeft");
}

#[test]
fn test_photo_view_order() {
    let photos = UserPhotos::new("F", "B", "R", "L");
    let ordered: Vec<(PhotoView, &str)> = photos.ordered().into_iter().collect();
    assert_eq!(
        ordered,
        vec![
            (PhotoView::Front, "F"),
            (PhotoView::Back, "B"),
            (PhotoView::SideRight, "R"),
            (PhotoView::SideLeft, "L"),
        ]
    );
}

#[test]
fn test_image_data_uri() {
    assert_eq!(image_data_uri(b"abc", "image/png"), "data:image/png;base64,YWJj");
    assert_eq!(mime_for_path(Path::new("front.PNG")), "image/png");
    assert_eq!(mime_for_path(Path::new("back.webp")), "image/webp");
    assert_eq!(mime_for_path(Path::new("side.jpeg")), "image/jpeg");
    assert_eq!(mime_for_path(Path::new("noext")), "image/jpeg");
}

#[test]
fn test_photos_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let write = |name: &str, bytes: &[u8]| {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    };

    let front = write("front.jpg", b"front");
    let back = write("back.png", b"back");
    let right = write("right.jpg", b"right");
    let left = write("left.jpg", b"left");

    let photos = UserPhotos::from_files(&front, &back, &right, &left).unwrap();

    assert_eq!(photos.front, "data:image/jpeg;base64,ZnJvbnQ=");
    assert_eq!(photos.back, "data:image/png;base64,YmFjaw==");
    assert!(photos.validate().is_ok());

    let missing = dir.path().join("missing.jpg");
    assert!(UserPhotos::from_files(&front, &back, &right, &missing).is_err());
}
