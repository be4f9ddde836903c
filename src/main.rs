// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapfit-Tracker console frontend
//!
//! Collects form submissions from stdin, renders the workout list, and
//! drives a text map surface. All domain behavior lives in the library; this
//! binary only adapts the two view collaborators to a terminal.

use std::io::{self, BufRead, Write};

use mapfit_tracker::{
    config::Config,
    models::{LatLng, Workout, WorkoutId, WorkoutType},
    services::{
        MapSurface, MarkerHandle, ResetOutcome, SortCriterion, WorkoutDraft, WorkoutEngine,
    },
    storage::{FileSlot, StorageBridge},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Text map surface: markers are lines on stdout.
struct ConsoleMap {
    next_handle: u64,
}

impl MapSurface for ConsoleMap {
    fn place_marker(&mut self, coords: LatLng, label: &str) -> MarkerHandle {
        self.next_handle += 1;
        println!("[map] marker {} at {coords}: {label}", self.next_handle);
        MarkerHandle(self.next_handle)
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        println!("[map] marker {} removed", handle.0);
    }

    fn center_on(&mut self, coords: LatLng, zoom: u8) {
        println!("[map] centered on {coords} (zoom {zoom})");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(path = %config.data_path.display(), "Starting Mapfit-Tracker");

    let storage = StorageBridge::new(FileSlot::new(&config.data_path));
    let map = ConsoleMap { next_handle: 0 };
    let mut engine = WorkoutEngine::bootstrap(storage, map, config.map_zoom)?;

    // The user's position is resolved once at startup; failure is reported
    // and not retried.
    match config.home {
        Some(coords) => engine.center_map(coords),
        None => eprintln!("Could not get your position"),
    }

    render_list(&engine, SortCriterion::InsertionOrder);
    run_loop(&mut engine)
}

/// Initialize structured logging.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn run_loop(
    engine: &mut WorkoutEngine<FileSlot, ConsoleMap>,
) -> Result<(), Box<dyn std::error::Error>> {
    print_help();
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = tokens.split_first() else {
            continue;
        };
        match command {
            "quit" => return Ok(()),
            "help" => print_help(),
            "reset" => {
                if engine.reset_all()? == ResetOutcome::RestartRequired {
                    println!("Workout store cleared. Restart to reload.");
                    return Ok(());
                }
            }
            _ => {
                // every other command is fallible user input
                if let Err(err) = handle_command(engine, command, args) {
                    println!("{err}");
                }
            }
        }
    }
}

fn handle_command(
    engine: &mut WorkoutEngine<FileSlot, ConsoleMap>,
    command: &str,
    args: &[&str],
) -> mapfit_tracker::Result<()> {
    use mapfit_tracker::AppError;

    match (command, args) {
        ("add", [kind, lat, lng, distance, duration, variant_field]) => {
            let workout_type = WorkoutType::from_input(kind)
                .ok_or_else(|| AppError::BadRequest(format!("unknown workout type '{kind}'")))?;
            let coords = parse_coords(lat, lng)?;
            let (cadence, elevation_gain) = match workout_type {
                WorkoutType::Running => (variant_field.to_string(), String::new()),
                WorkoutType::Cycling => (String::new(), variant_field.to_string()),
            };
            let draft = WorkoutDraft {
                workout_type,
                coords,
                distance: distance.to_string(),
                duration: duration.to_string(),
                cadence,
                elevation_gain,
            };
            let workout = engine.create_workout(draft)?;
            println!("Added {}", render_row(workout));
            Ok(())
        }
        ("edit", [id, field, value]) => {
            let derived = engine.edit_field(&WorkoutId::from(*id), field, value)?;
            println!("Updated; derived metric is now {derived:.1}");
            Ok(())
        }
        ("delete", [id]) => {
            let removed = engine.delete_workout(&WorkoutId::from(*id))?;
            println!("Deleted {}", removed.description());
            Ok(())
        }
        ("visit", [id]) => {
            engine.visit_workout(&WorkoutId::from(*id))?;
            Ok(())
        }
        ("list", []) => {
            render_list(engine, SortCriterion::InsertionOrder);
            Ok(())
        }
        ("list", [selector]) => {
            let criterion = SortCriterion::from_selector(selector)
                .ok_or_else(|| AppError::BadRequest(format!("unknown sort '{selector}'")))?;
            render_list(engine, criterion);
            Ok(())
        }
        _ => Err(AppError::BadRequest(format!(
            "unrecognized command '{command}' (try 'help')"
        ))),
    }
}

fn parse_coords(lat: &str, lng: &str) -> mapfit_tracker::Result<LatLng> {
    let lat: f64 = lat
        .parse()
        .map_err(|_| mapfit_tracker::AppError::BadRequest("bad latitude".to_string()))?;
    let lng: f64 = lng
        .parse()
        .map_err(|_| mapfit_tracker::AppError::BadRequest("bad longitude".to_string()))?;
    Ok(LatLng(lat, lng))
}

fn render_list(engine: &WorkoutEngine<FileSlot, ConsoleMap>, criterion: SortCriterion) {
    let view = engine.project(criterion);
    if view.is_empty() {
        println!("No workouts yet.");
        return;
    }
    for workout in view {
        println!("{}", render_row(workout));
    }
}

fn render_row(workout: &Workout) -> String {
    let metrics = match workout.workout_type() {
        WorkoutType::Running => format!(
            "pace {:.1} min/km, cadence {} spm",
            workout.derived_metric(),
            workout.variant_field()
        ),
        WorkoutType::Cycling => format!(
            "speed {:.1} km/h, elevation {} m",
            workout.derived_metric(),
            workout.variant_field()
        ),
    };
    format!(
        "[{}] {} {}: {} km in {} min, {}",
        workout.id(),
        workout.workout_type().icon(),
        workout.description(),
        workout.distance(),
        workout.duration(),
        metrics
    )
}

fn print_help() {
    println!("Commands:");
    println!("  add running <lat> <lng> <distance> <duration> <cadence>");
    println!("  add cycling <lat> <lng> <distance> <duration> <elevation>");
    println!("  edit <id> <distance|duration|cadence|elevationGain> <value>");
    println!("  delete <id>   visit <id>   list [time|distance|duration|type]");
    println!("  reset   help   quit");
}
