pub mod config;
pub mod render;
pub mod run;
pub mod snap;

use std::path::Path;

use dialtimer_core::Config;

/// Load the config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> dialtimer_core::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
