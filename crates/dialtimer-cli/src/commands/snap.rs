use std::path::Path;

use clap::Args;
use dialtimer_core::geometry::angle_to_seconds;
use dialtimer_core::timer::format_clock;
use dialtimer_core::{DialGeometry, DragMode, PointerSample};
use serde::Serialize;

use super::load_config;

#[derive(Args)]
pub struct SnapArgs {
    /// Pointer x in dial units (0-100)
    #[arg(long, allow_hyphen_values = true)]
    x: f64,
    /// Pointer y in dial units (0-100)
    #[arg(long, allow_hyphen_values = true)]
    y: f64,
    /// Snap to whole minutes instead of the 5-minute grid
    #[arg(long)]
    fine: bool,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SnapOutput {
    angle: f64,
    raw_secs: f64,
    mode: DragMode,
    snapped_secs: u32,
    display: String,
}

pub fn run(args: SnapArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let dial = DialGeometry::new(config.dial.center, config.dial.radius);
    let mode = if args.fine { DragMode::Fine } else { DragMode::Default };

    let sample = PointerSample::new(args.x, args.y);
    let angle = dial.angle_of(sample);
    let snapped_secs = config.snap.resolve_pointer(sample, mode, &dial);
    let output = SnapOutput {
        angle,
        raw_secs: angle_to_seconds(angle),
        mode,
        snapped_secs,
        display: format_clock(snapped_secs),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} ({}s)", output.display, output.snapped_secs);
    }
    Ok(())
}
