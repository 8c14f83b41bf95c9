// ABOUTME: Command-line entry point for the rep coach runtime
// ABOUTME: Lists exercises and plans, and replays recorded keypoint streams through a workout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Rep Coach CLI
//!
//! Usage:
//! ```bash
//! # Show the exercise profile table
//! rep-coach exercises
//!
//! # Show the built-in workout plans
//! rep-coach plans --json
//!
//! # Run a plan against a recorded keypoint stream
//! rep-coach replay --plan beginner_fullbody --recording session.jsonl
//!
//! # Custom plan from a JSON list of entries, first goal overridden to 5
//! rep-coach replay --custom entries.json --recording session.jsonl --goal 5
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use rep_coach::catalog::ExerciseCatalog;
use rep_coach::config::{CoachConfig, DetectionConfig};
use rep_coach::detection::replay::{Recording, ReplayFrameSource, ReplayPoseSource};
use rep_coach::detection::{DetectionHandle, DetectionLoop, DetectionStats, LoopExit};
use rep_coach::formatters::format_elapsed;
use rep_coach::lifecycle::{AdvanceOutcome, WorkoutManager};
use rep_coach::logging::LoggingConfig;
use rep_coach::models::{Goal, WorkoutPlan, WorkoutSummary};
use rep_coach::notifications::{EventRecorder, SessionEvent, TracingObserver};
use rep_coach::plan_catalog::{build_custom_plan, builtin_plans, find_plan, CustomEntry};
use rep_coach::session::ExerciseSession;
use serde::Serialize;
use tokio::{fs, signal};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "rep-coach",
    about = "Pose-driven repetition counter",
    long_about = "Count exercise repetitions from pose keypoints and walk through workout plans"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the exercise profile table
    Exercises {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the built-in workout plans
    Plans {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Run a workout plan against a recorded keypoint stream
    Replay(ReplayArgs),
}

#[derive(clap::Args)]
struct ReplayArgs {
    /// Built-in plan id
    #[arg(long, required_unless_present = "custom", conflicts_with = "custom")]
    plan: Option<String>,

    /// JSON file with a list of custom plan entries
    #[arg(long)]
    custom: Option<PathBuf>,

    /// JSON-lines keypoint recording
    #[arg(long)]
    recording: PathBuf,

    /// Override the first exercise's goal value
    #[arg(long)]
    goal: Option<u32>,

    /// Loop the recording instead of stopping at its end
    #[arg(long)]
    repeat: bool,

    /// Synthetic frame width in pixels
    #[arg(long, default_value = "640")]
    width: u32,

    /// Synthetic frame height in pixels
    #[arg(long, default_value = "480")]
    height: u32,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

/// Outcome of a replay run
#[derive(Serialize)]
struct ReplayReport {
    complete: bool,
    summary: WorkoutSummary,
    detection: DetectionStats,
    errors: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    let config = CoachConfig::from_env()?;
    info!("{}", config.summary());

    match cli.command {
        Command::Exercises { json } => list_exercises(&config, json),
        Command::Plans { json } => list_plans(json),
        Command::Replay(replay_args) => replay(&config, &replay_args).await,
    }
}

fn list_exercises(config: &CoachConfig, json: bool) -> Result<()> {
    let catalog = ExerciseCatalog::builtin()?.with_default_fallback(config.allow_default_profile);
    let profiles = catalog.profiles();
    if json {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    println!("{:<20} {:<20} {:<8} {:<10} {:>6} {:>6}", "ID", "NAME", "START", "DIRECTION", "UP", "DOWN");
    for profile in profiles {
        match profile.primary_tracker() {
            Some(tracker) => println!(
                "{:<20} {:<20} {:<8} {:<10} {:>6.0} {:>6.0}",
                profile.id,
                profile.display_name,
                profile.start_state.to_string(),
                format!("{:?}", tracker.direction()).to_lowercase(),
                tracker.up_angle(),
                tracker.down_angle()
            ),
            None => println!(
                "{:<20} {:<20} {:<8} {:<10} {:>6} {:>6}",
                profile.id,
                profile.display_name,
                profile.start_state.to_string(),
                "timed",
                "-",
                "-"
            ),
        }
    }
    Ok(())
}

fn list_plans(json: bool) -> Result<()> {
    let plans = builtin_plans();
    if json {
        println!("{}", serde_json::to_string_pretty(&plans)?);
        return Ok(());
    }

    for plan in plans {
        println!(
            "{} ({}, {:?}, ~{} min, ~{:.0} kcal)",
            plan.id, plan.name, plan.difficulty, plan.estimated_minutes, plan.estimated_calories
        );
        for exercise in &plan.exercises {
            println!("    {} x{}: {}", exercise.name, exercise.sets, exercise.target);
        }
    }
    Ok(())
}

async fn load_plan(args: &ReplayArgs, catalog: &ExerciseCatalog) -> Result<WorkoutPlan> {
    if let Some(path) = &args.custom {
        return Ok(build_custom_plan(catalog, &read_custom_entries(path).await?)?);
    }
    match &args.plan {
        Some(id) => Ok(find_plan(id)?),
        None => bail!("either --plan or --custom is required"),
    }
}

async fn read_custom_entries(path: &Path) -> Result<Vec<CustomEntry>> {
    let text = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&text)?)
}

async fn replay(config: &CoachConfig, args: &ReplayArgs) -> Result<()> {
    let mut manager = WorkoutManager::from_config(config)?;
    let plan = load_plan(args, manager.catalog()).await?;
    let plan_id = plan.id.clone();

    let mut observer = (TracingObserver, EventRecorder::new());
    manager.start_workout(plan, &mut observer)?;
    if let Some(goal) = args.goal {
        manager.apply_goal_override(goal, &mut observer)?;
    }

    let handle = DetectionHandle::new();
    let pose_source = ReplayPoseSource::new(Recording::load(&args.recording).await?)
        .repeating(args.repeat)
        .stop_when_exhausted(handle.clone());
    let detection_config = DetectionConfig {
        stop_on_goal: true,
        ..config.detection
    };
    let mut detection = DetectionLoop::new(
        pose_source,
        ReplayFrameSource::new(args.width, args.height),
        detection_config,
    )
    .with_handle(handle.clone());

    let interrupt = handle.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping detection");
            interrupt.stop();
        }
    });

    let (complete, summary) = loop {
        match detection.run(&mut manager, &mut observer).await? {
            LoopExit::GoalReached => match manager.advance_to_next(&mut observer)? {
                AdvanceOutcome::Next { exercise_index } => {
                    info!(exercise.index = exercise_index, "Advancing to next exercise");
                }
                AdvanceOutcome::Completed(summary) => break (true, summary),
            },
            LoopExit::Stopped | LoopExit::NoActiveSession => {
                let mut exercises = manager.completed().to_vec();
                exercises.extend(manager.session().map(ExerciseSession::to_completed));
                break (false, WorkoutSummary::from_exercises(plan_id, exercises));
            }
        }
    };

    let report = ReplayReport {
        complete,
        summary,
        detection: detection.stats(),
        errors: observer
            .1
            .events()
            .iter()
            .filter(|event| matches!(event, SessionEvent::Error { .. }))
            .count(),
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &ReplayReport) {
    let status = if report.complete { "complete" } else { "stopped early" };
    println!("Workout {} ({status})", report.summary.plan_id);
    for exercise in &report.summary.exercises {
        let progress = match exercise.goal {
            Goal::Reps(target) => format!("{}/{target} reps", exercise.rep_count),
            Goal::Duration(target) => format!("{}/{target}s", exercise.elapsed_seconds),
        };
        println!(
            "    {:<20} {:<14} {}  {:.1} kcal{}",
            exercise.exercise_id,
            progress,
            format_elapsed(exercise.elapsed_seconds),
            exercise.calories,
            if exercise.goal_reached { "" } else { "  (goal not reached)" }
        );
    }
    println!(
        "Total: {:.1} kcal in {}",
        report.summary.total_calories,
        format_elapsed(report.summary.total_duration_seconds)
    );
    println!(
        "Frames: {} processed, {} dropped, {} estimator errors ({} notifications)",
        report.detection.frames_processed,
        report.detection.frames_dropped,
        report.detection.estimator_failures,
        report.errors
    );
}
