mod app;

use anyhow::{anyhow, Context, Result};
use clap::{crate_version, value_parser, Arg, ArgAction, ArgMatches, Command};
use epimap::{Visualizer, VisualizerOptions};
use std::path::{Path, PathBuf};

/// Desktop visualizer for simulation output
#[tokio::main]
async fn main() -> Result<()> {
    epimap::init_logging();

    let matches = get_matches();
    let options = match matches.get_one::<PathBuf>("config") {
        Some(path) => VisualizerOptions::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => VisualizerOptions::default(),
    };
    let data = matches.get_one::<PathBuf>("data").cloned();

    if let Some(dir) = matches.get_one::<PathBuf>("export") {
        let data = data.context("--export needs a simulation file")?;
        return export(options, &data, dir);
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                options.viewport.width as f32 + 420.0,
                options.viewport.height as f32 + 90.0,
            ])
            .with_title("Epimap - Epidemic Simulation Visualizer"),
        ..Default::default()
    };

    eframe::run_native(
        "epimap-app",
        native_options,
        Box::new(move |cc| Box::new(app::EpimapApp::new(cc, options, data))),
    )
    .map_err(|err| anyhow!("viewer failed: {}", err))?;

    Ok(())
}

fn get_matches() -> ArgMatches {
    Command::new("epimap-app")
        .version(crate_version!())
        .about("visualizes epidemic simulation output on a map")
        .arg(Arg::new("data")
            .value_name("FILE")
            .value_parser(value_parser!(PathBuf))
            .help("the simulation file to open")
            .action(ArgAction::Set)
        )
        .arg(Arg::new("config")
            .short('c')
            .long("config")
            .value_name("FILE")
            .value_parser(value_parser!(PathBuf))
            .help("the visualizer options file")
            .action(ArgAction::Set)
        )
        .arg(Arg::new("export")
            .short('e')
            .long("export")
            .value_name("DIR")
            .value_parser(value_parser!(PathBuf))
            .help("write one SVG per day into DIR instead of opening a window")
            .action(ArgAction::Set)
        )
        .get_matches()
}

fn export(options: VisualizerOptions, data: &Path, dir: &Path) -> Result<()> {
    let mut visualizer = Visualizer::new(options);
    let session = visualizer
        .load_file(data)
        .with_context(|| format!("failed to load {}", data.display()))?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    for day in 0..session.max_days() {
        session.update_day(day as i64);
        let path = dir.join(format!("day-{:04}.svg", session.display_day()));
        std::fs::write(&path, session.to_svg()?)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    log::info!("Wrote {} frames to {}", session.max_days(), dir.display());
    Ok(())
}
