mod config;

pub use config::{Config, DialConfig, NotificationsConfig, TimerConfig};

use std::path::PathBuf;

/// Returns `~/.config/dialtimer[-dev]/` based on DIALTIMER_ENV.
///
/// Set DIALTIMER_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> crate::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DIALTIMER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("dialtimer-dev")
    } else {
        base_dir.join("dialtimer")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
