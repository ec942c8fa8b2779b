//! Writes a synthetic telemetry log for trying out the viewer:
//! `time` plus two scalar channels, a control output with gaps, and a
//! 16-pixel line camera as an array column.

use std::f64::consts::PI;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

const CAMERA_PIXELS: usize = 16;

#[derive(Debug, Parser)]
struct Args {
    /// Output CSV path
    #[arg(default_value = "sample_telemetry.csv")]
    output: PathBuf,

    /// Number of data rows
    #[arg(long, default_value_t = 2000)]
    rows: usize,

    /// Sample period in seconds
    #[arg(long, default_value_t = 0.01)]
    period: f64,
}

/// Line position in pixels at time `t`, sweeping across the sensor.
fn line_position(t: f64) -> f64 {
    (CAMERA_PIXELS as f64 - 1.0) * 0.5 * (1.0 + (2.0 * PI * 0.2 * t).sin())
}

fn camera_frame(t: f64) -> String {
    let centre = line_position(t);
    let pixels: Vec<String> = (0..CAMERA_PIXELS)
        .map(|px| {
            let d = px as f64 - centre;
            let intensity = 200.0 * (-d * d / 4.0).exp() + 20.0;
            format!("{}", intensity.round())
        })
        .collect();
    format!("[{}]", pixels.join(","))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writer.write_record(["time", "line", "speed", "steer", "camera"])?;

    for row in 0..args.rows {
        let t = row as f64 * args.period;
        let line = line_position(t);
        let speed = 1.5 + 0.25 * (2.0 * PI * 0.05 * t).cos();
        // The controller only logs every fifth row.
        let steer = if row % 5 == 0 {
            format!("{:.4}", 0.1 * (line - CAMERA_PIXELS as f64 / 2.0))
        } else {
            String::new()
        };

        writer.write_record([
            format!("{t:.3}"),
            format!("{line:.3}"),
            format!("{speed:.3}"),
            steer,
            camera_frame(t),
        ])?;
    }
    writer.flush()?;

    log::info!("wrote {} rows to {}", args.rows, args.output.display());
    println!("{}", args.output.display());
    Ok(())
}
