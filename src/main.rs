extern crate log;
pub mod config;
pub mod data;
pub mod geofile;
pub mod interaction;
pub mod map;
pub mod panel;
pub mod style;
use crate::config::Config;
use crate::data::loader::load_map_data;
use crate::interaction::controller::MapController;
use crate::interaction::session::run_session;
use crate::map::layer_group::LayerKind;
use crate::map::map_view::MapView;
use anyhow::anyhow;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

/// Interactive zoning and school district map.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the YAML config file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config_filepath: Option<PathBuf>,

    /// Read session commands from this file instead of stdin.
    #[arg(short, long)]
    script: Option<PathBuf>,
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;
    let config = Config::load(args.config_filepath.as_deref())?;

    let map = MapView::new(&config.view, config.tiles.clone());
    let mut controller =
        MapController::new(map, config.zoning_palette(), config.school_palette());
    if load_map_data(&mut controller, &config.data) {
        log::info!(
            "Loaded {} zoning and {} school features",
            controller.map().layer_group(LayerKind::Zoning).len(),
            controller.map().layer_group(LayerKind::School).len()
        );
    }

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", controller.info_panel())?;
    match args.script {
        Some(script) => {
            if !script.exists() {
                return Err(anyhow!("Script file {:?} not found", script));
            }
            run_session(&mut controller, BufReader::new(File::open(script)?), &mut stdout)
        }
        None => run_session(&mut controller, io::stdin().lock(), &mut stdout),
    }
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    env_logger::init();
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}
