//! Command-line entry point: analyze four local photos directly.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser};
use scanfit::config::Config;
use scanfit::model::{FitnessLevel, Gender, Goal, Measurements, UserData, UserPhotos};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "scanfit", about = "Estimate body composition from four photos")]
struct Args {
    /// Front view photo.
    #[arg(long)]
    front: PathBuf,
    /// Back view photo.
    #[arg(long)]
    back: PathBuf,
    /// Right side photo.
    #[arg(long)]
    side_right: PathBuf,
    /// Left side photo.
    #[arg(long)]
    side_left: PathBuf,

    /// male or female.
    #[arg(long)]
    gender: Gender,
    /// Age in years.
    #[arg(long)]
    age: u32,
    /// Weight in kilograms.
    #[arg(long)]
    weight: f64,
    /// Height in centimetres.
    #[arg(long)]
    height: f64,
    /// muscle_gain, fat_loss, body_recomp or performance.
    #[arg(long)]
    goal: String,

    /// beginner, intermediate or advanced.
    #[arg(long)]
    fitness_level: Option<FitnessLevel>,
    #[arg(long)]
    weekly_workouts: Option<u32>,

    #[command(flatten)]
    measurements: MeasurementArgs,
}

/// Optional body measurements, in centimetres.
#[derive(Debug, Default, ClapArgs)]
#[command(next_help_heading = "Measurements (cm)")]
struct MeasurementArgs {
    #[arg(long)]
    chest: Option<f64>,
    #[arg(long)]
    waist: Option<f64>,
    #[arg(long)]
    hips: Option<f64>,
    #[arg(long)]
    arm: Option<f64>,
    #[arg(long)]
    thigh: Option<f64>,
    #[arg(long)]
    calf: Option<f64>,
}

impl MeasurementArgs {
    fn into_measurements(self) -> Option<Measurements> {
        let measurements = Measurements {
            chest: self.chest,
            waist: self.waist,
            hips: self.hips,
            arm: self.arm,
            thigh: self.thigh,
            calf: self.calf,
        };
        (!measurements.is_empty()).then_some(measurements)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scanfit=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let photos = UserPhotos::from_files(&args.front, &args.back, &args.side_right, &args.side_left)
        .context("failed to read photos")?;

    let mut user = UserData::new(
        args.gender,
        args.age,
        args.weight,
        args.height,
        Goal::from(args.goal),
    );
    user.fitness_level = args.fitness_level;
    user.weekly_workouts = args.weekly_workouts;
    user.measurements = args.measurements.into_measurements();

    let config = Config::from_env().context("invalid configuration")?;
    let analyzer = config.build_analyzer().context("failed to build HTTP client")?;

    match analyzer.analyze(photos, user).await {
        Ok(analysis) => {
            println!("{}", serde_json::to_string_pretty(&analysis)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}
