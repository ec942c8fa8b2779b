use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use telemetry_viewer::data::IngestOptions;

/// CSV telemetry / logger visualizer.
///
/// The first column is the independent axis; every other column is plotted,
/// as a line for numeric cells or a waterfall for `[a,b,…]` array cells.
#[derive(Debug, Parser)]
#[command(name = "telemetry-viewer", version)]
pub struct Cli {
    /// CSV log to open; a file dialog is shown when omitted
    pub file: Option<PathBuf>,

    /// Column names to merge into one plot, comma-separated; repeatable,
    /// e.g. `-m camera,line -m kp,kd`
    #[arg(short = 'm', long = "merge")]
    pub merge: Vec<String>,

    /// Data rows to discard after the header, before type inference
    #[arg(long, alias = "skip_data_rows", default_value_t = 0)]
    pub skip_data_rows: usize,

    /// Log progress every N rows (0 disables)
    #[arg(long, default_value_t = 1000)]
    pub progress_interval: u64,

    /// Read the log and print the plot layout without opening a window
    #[arg(long, default_value_t = false)]
    pub no_gui: bool,
}

impl Cli {
    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            skip_data_rows: self.skip_data_rows,
            merge: self.merge.clone(),
            progress_interval: self.progress_interval,
        }
    }

    /// The log to open: FILE if given, else whatever `pick` returns. Headless
    /// runs never prompt, so FILE is mandatory with `--no-gui`.
    pub fn log_file(&self, pick: impl FnOnce() -> Option<PathBuf>) -> Result<Option<PathBuf>> {
        match (&self.file, self.no_gui) {
            (Some(file), _) => Ok(Some(file.clone())),
            (None, true) => bail!("FILE is required with --no-gui"),
            (None, false) => Ok(pick()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_repeatable() {
        let cli = Cli::parse_from([
            "telemetry-viewer",
            "log.csv",
            "-m",
            "camera,line",
            "--merge",
            "kp,kd",
            "--skip_data_rows",
            "3",
        ]);
        let options = cli.ingest_options();
        assert_eq!(options.merge, ["camera,line", "kp,kd"]);
        assert_eq!(options.skip_data_rows, 3);
        assert_eq!(options.progress_interval, 1000);
        assert_eq!(cli.file, Some(PathBuf::from("log.csv")));
        assert!(!cli.no_gui);
    }

    #[test]
    fn headless_run_without_file_never_prompts() {
        let cli = Cli::parse_from(["telemetry-viewer", "--no-gui"]);
        let err = cli
            .log_file(|| panic!("file dialog opened in headless mode"))
            .unwrap_err();
        assert!(err.to_string().contains("--no-gui"), "{err}");
    }

    #[test]
    fn file_argument_wins_over_dialog() {
        let cli = Cli::parse_from(["telemetry-viewer", "--no-gui", "log.csv"]);
        let file = cli.log_file(|| panic!("file dialog opened")).unwrap();
        assert_eq!(file, Some(PathBuf::from("log.csv")));

        let cli = Cli::parse_from(["telemetry-viewer"]);
        let picked = cli.log_file(|| Some(PathBuf::from("picked.csv"))).unwrap();
        assert_eq!(picked, Some(PathBuf::from("picked.csv")));
    }

    #[test]
    fn file_is_optional() {
        let cli = Cli::parse_from(["telemetry-viewer", "--no-gui"]);
        assert!(cli.file.is_none());
        assert!(cli.no_gui);
        assert!(cli.merge.is_empty());
    }
}
