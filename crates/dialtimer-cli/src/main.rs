use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dialtimer-cli", version, about = "Dial countdown timer CLI")]
struct Cli {
    /// Config file to use instead of ~/.config/dialtimer/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dial as an SVG document
    Render(commands::render::RenderArgs),
    /// Resolve a pointer position on the dial to a snapped duration
    Snap(commands::snap::SnapArgs),
    /// Print the wedge path data for a remaining time
    Wedge {
        /// Remaining time in seconds
        #[arg(long, allow_hyphen_values = true)]
        seconds: f64,
    },
    /// Run an interactive countdown driven from stdin
    Run(commands::run::RunArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "dialtimer=debug" } else { "dialtimer=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Render(args) => commands::render::run(args, config_path),
        Commands::Snap(args) => commands::snap::run(args, config_path),
        Commands::Wedge { seconds } => commands::render::wedge(seconds, config_path),
        Commands::Run(args) => commands::run::run(args, config_path),
        Commands::Config { action } => commands::config::run(action, config_path),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
