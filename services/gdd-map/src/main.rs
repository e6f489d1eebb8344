//! Washington State GDD map.
//!
//! Loads gridMET daily tmin/tmax, computes the Jan-Apr 1991-2020 average
//! Growing Degree Day accumulation and renders it as a filled-contour PNG.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use gdd_common::GddResult;
use gdd_engine::{load_field_window, run_pipeline, PipelineConfig};
use renderer::{open_in_viewer, render_map, FontSet, MapGrid, MapOptions};

const DEFAULT_OUTPUT: &str = "Washington_GDD_Map_Jan_Apr.png";

#[derive(Parser, Debug)]
#[command(name = "gdd-map")]
#[command(about = "Render the Washington State Jan-Apr Growing Degree Day map")]
struct Args {
    /// Daily minimum temperature dataset (NetCDF, Kelvin)
    #[arg(long, env = "GDD_TMIN_PATH")]
    tmin: PathBuf,

    /// Daily maximum temperature dataset (NetCDF, Kelvin)
    #[arg(long, env = "GDD_TMAX_PATH")]
    tmax: PathBuf,

    /// Variable name inside the tmin file
    #[arg(long, default_value = "tmin")]
    tmin_var: String,

    /// Variable name inside the tmax file
    #[arg(long, default_value = "tmax")]
    tmax_var: String,

    /// Output PNG path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// TrueType font for map text (system fonts, then the bundled font, if unset)
    #[arg(long, env = "GDD_FONT_PATH")]
    font: Option<PathBuf>,

    /// Save the map without opening it in a viewer
    #[arg(long)]
    no_show: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    netcdf_parser::silence_hdf5_errors();

    let start = Instant::now();
    let output = match run(&args) {
        Ok(path) => path,
        Err(e) => {
            error!(code = e.code(), error = %e, "GDD map failed");
            return Err(e).context("failed to produce the GDD map");
        }
    };
    info!(
        path = %output.display(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Saved GDD map"
    );

    if args.no_show {
        return Ok(());
    }
    if let Err(e) = open_in_viewer(&output) {
        warn!(error = %e, "Could not display the map");
        return Err(e).context("failed to display the GDD map");
    }

    Ok(())
}

/// Load, compute and render. Returns the path of the written PNG.
fn run(args: &Args) -> GddResult<PathBuf> {
    let config = PipelineConfig::default();
    info!(
        tmin = %args.tmin.display(),
        tmax = %args.tmax.display(),
        bbox = ?config.bbox,
        base_temp = config.base_temp,
        "Starting GDD pipeline"
    );

    let window = config.read_window();
    let tmin = load_field_window(&args.tmin, &args.tmin_var, &window)?;
    let tmax = load_field_window(&args.tmax, &args.tmax_var, &window)?;

    let result = run_pipeline(&tmin, &tmax, &config)?;
    let climatology = &result.climatology;
    info!(
        stages = result.stages.len(),
        max_gdd = ?climatology.nan_max(),
        "GDD climatology ready"
    );

    let fonts = FontSet::load(args.font.as_deref())?;
    info!(font = %fonts.source().display(), "Loaded font");

    let grid = MapGrid {
        lat: &climatology.lat,
        lon: &climatology.lon,
        values: climatology.values.view(),
    };
    let figure = render_map(&grid, &MapOptions::default(), &fonts)?;
    save(&figure, &args.output)?;

    Ok(args.output.clone())
}

fn save(figure: &renderer::RenderedFigure, path: &Path) -> GddResult<()> {
    figure.save(path)?;
    info!(
        width = figure.width,
        height = figure.height,
        dpi = figure.dpi,
        bytes = figure.png.len(),
        "Wrote PNG"
    );
    Ok(())
}
