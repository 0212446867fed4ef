#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that replays a scripted build-mode session.

mod ascii;
mod session;

use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use floorplan_calculator::LotKey;
use floorplan_grid::{FloorGrid, GridSettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ascii::AsciiRenderer;

#[derive(Debug, Parser)]
#[command(name = "floorplan")]
#[command(about = "Replays a scripted build session on a lot and prints the floor plan")]
struct Cli {
    /// Lot to build on, e.g. `neighborhood1_lot2`.
    #[arg(long, default_value_t = LotKey::default())]
    lot: LotKey,

    /// TOML file with lot overrides and the orphan policy.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log every click, commit and rejection.
    #[arg(long)]
    debug: bool,

    /// Print only the last mesh drawn by the renderer.
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let settings = load_settings(cli.config.as_ref())?;
    let mut grid = FloorGrid::new(settings, AsciiRenderer::default());
    grid.set_debug(cli.debug);
    grid.initialize(cli.lot, 0.0)
        .with_context(|| format!("failed to initialize lot {}", cli.lot))?;

    let summary = if cli.quiet {
        session::run(&mut grid, &mut io::sink())?
    } else {
        session::run(&mut grid, &mut io::stdout().lock())?
    };

    if cli.quiet {
        print!("{}", grid.renderer().frame());
    } else {
        let path = summary
            .path_length
            .map_or_else(|| "none".to_owned(), |length| length.to_string());
        println!(
            "{} applied, {} rejected, {} rooms, path length {path}, {} meshes drawn",
            summary.applied,
            summary.rejected,
            summary.rooms,
            grid.renderer().regenerations()
        );
    }
    Ok(())
}

fn init_tracing(debug: bool) {
    let fallback = if debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_settings(path: Option<&PathBuf>) -> Result<GridSettings> {
    let Some(path) = path else {
        return Ok(GridSettings::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    GridSettings::from_toml_str(&contents)
        .with_context(|| format!("invalid settings in {}", path.display()))
}
