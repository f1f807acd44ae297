use crate::types::{Coords, WorkoutKind};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_STORE: &str = "mapty-store.json";

#[derive(Parser, Debug)]
#[command(
    name = "mapty",
    about = "Log running and cycling workouts at map locations"
)]
pub struct Cli {
    /// JSON file holding stored workouts.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_STORE, global = true)]
    pub store: PathBuf,

    /// Current position, LAT,LNG. Without it the session has no map.
    #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true, global = true)]
    pub at: Option<Coords>,

    /// Map zoom for the initial view and for recentring.
    #[arg(long, default_value_t = crate::config::DEFAULT_ZOOM, global = true)]
    pub zoom: u8,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Record a workout at a clicked map location.
    Add {
        /// Where the workout took place, LAT,LNG.
        #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
        click: Coords,

        #[arg(long = "type", value_name = "running|cycling", default_value = "running")]
        kind: WorkoutKind,

        /// Distance in km.
        #[arg(long, allow_hyphen_values = true)]
        distance: String,

        /// Duration in minutes.
        #[arg(long, allow_hyphen_values = true)]
        duration: String,

        /// Steps per minute (running).
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        cadence: String,

        /// Elevation gain in m, may be negative (cycling).
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        elevation: String,
    },

    /// Print stored workouts, newest first.
    List,

    /// Recentre the map on a stored workout.
    Goto { id: String },

    /// Delete all stored workouts.
    Reset,
}
