//! File logging.
//!
//! The terminal belongs to the game while it runs, so log records go to
//! `~/.dino-link/dino-link.log`. The level comes from `DINO_LINK_LOG`
//! (env_logger filter syntax) and defaults to `warn`.

use super::persistence::data_path;
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

pub const LOG_FILE: &str = "dino-link.log";
pub const LOG_ENV: &str = "DINO_LINK_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Install the global logger. Returns the log file path.
pub fn init_logging() -> io::Result<PathBuf> {
    let path = data_path(LOG_FILE)?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    Builder::new()
        .parse_env(Env::new().filter_or(LOG_ENV, DEFAULT_FILTER))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    Ok(path)
}
