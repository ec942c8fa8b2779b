mod app;
mod cli;
mod color;
mod state;
mod ui;

use anyhow::{anyhow, Result};
use clap::Parser;
use eframe::egui;

use app::TelemetryViewerApp;
use cli::Cli;
use state::ViewerState;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let Some(path) = cli.log_file(ui::panels::pick_log_file)? else {
        log::info!("no log selected");
        return Ok(());
    };

    // The whole log is read before anything is shown; a bad log never opens
    // a window.
    let mut state = ViewerState::new(cli.ingest_options());
    state.load(&path)?;
    if let Some(log) = &state.log {
        println!("finished: parsed {} rows", log.rows);
    }

    if cli.no_gui {
        for line in state.layout_summary() {
            println!("{line}");
        }
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Telemetry Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(TelemetryViewerApp::new(state)))),
    )
    .map_err(|e| anyhow!("viewer window failed: {e}"))
}
