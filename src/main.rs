#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result, bail};
use clap::Parser;
use mapty::app::{App, AppEvent};
use mapty::cli::{Cli, Cmd};
use mapty::config::AppConfig;
use mapty::form::Field;
use mapty::storage::FileStore;
use mapty::terminal::{FixedGeolocation, StderrNotifier, TerminalMap};
use mapty::types::{Coords, WorkoutId};
use mapty::utils;

#[macro_use]
extern crate mapty;

type TerminalApp = App<TerminalMap, FixedGeolocation, FileStore, StderrNotifier>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let config = AppConfig {
        zoom: cli.zoom,
        ..AppConfig::default()
    };
    let store = FileStore::new(&cli.store);
    dlog!("store={} at={:?}", store.path().display(), cli.at);

    let mut app = start_session(config, store, cli.at);

    match cli.cmd {
        Cmd::Add {
            click,
            kind,
            distance,
            duration,
            cadence,
            elevation,
        } => {
            if !app.map_provider().click(click) {
                bail!("No map for this session; pass --at LAT,LNG to place a workout.");
            }
            app.pump();

            app.handle(AppEvent::TypeChanged(kind));
            app.set_field(Field::Distance, distance);
            app.set_field(Field::Duration, duration);
            app.set_field(Field::Cadence, cadence);
            app.set_field(Field::Elevation, elevation);

            let id = app.submit_form().context("Workout not recorded")?;
            if let Some(entry) = app.entries().first() {
                println!("{entry}");
            }
            tracing::info!(id = %id, total = app.workouts().len(), "saved");
        }
        Cmd::List => {
            if app.entries().is_empty() {
                println!("No workouts yet.");
            }
            for entry in app.entries() {
                println!("{entry}");
            }
        }
        Cmd::Goto { id } => {
            let id = WorkoutId::from(id.as_str());
            app.select_workout(&id)
                .with_context(|| format!("Cannot recentre on {id}"))?;
            if let Some((at, zoom)) = app.map_provider().center() {
                println!("Centred on {at} (zoom {zoom})");
            }
        }
        Cmd::Reset => {
            let cleared = app.workouts().len();
            app.reset()?;
            app.pump();
            println!("Cleared {cleared} stored workout(s).");
        }
    }

    Ok(())
}

fn start_session(config: AppConfig, store: FileStore, at: Option<Coords>) -> TerminalApp {
    let mut app = App::new(
        config,
        TerminalMap::new(),
        FixedGeolocation::new(at),
        store,
        StderrNotifier::new(),
    );
    app.start();
    app.pump();
    app
}
