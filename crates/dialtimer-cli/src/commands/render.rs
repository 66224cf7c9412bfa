use std::path::{Path, PathBuf};

use clap::Args;
use dialtimer_core::{
    CannedPrompt, DialController, DialGeometry, ManualScheduler, RecordingNotifier, SvgSurface,
    TimerEngine,
};

use super::load_config;

#[derive(Args)]
pub struct RenderArgs {
    /// Duration shown on the dial; defaults to timer.default_minutes
    #[arg(long, allow_hyphen_values = true)]
    minutes: Option<i64>,
    /// Write the SVG here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

pub fn run(args: RenderArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let mut dial = DialController::new(
        TimerEngine::new(ManualScheduler::new()),
        SvgSurface::new(),
        RecordingNotifier::default(),
        CannedPrompt::new(),
        config.dial_settings(),
    );
    if let Some(minutes) = args.minutes {
        dial.set_time(minutes.saturating_mul(60));
    }

    let document = dial.surface().document();
    match args.output {
        Some(path) => {
            std::fs::write(&path, document)?;
            tracing::info!(path = %path.display(), "dial written");
        }
        None => print!("{document}"),
    }
    Ok(())
}

pub fn wedge(seconds: f64, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let dial = DialGeometry::new(config.dial.center, config.dial.radius);
    println!("{}", dial.wedge_path(seconds));
    Ok(())
}
