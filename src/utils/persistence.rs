//! JSON persistence under `~/.dino-link/`.
//!
//! Only configuration lives here; game sessions are never saved.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const DATA_DIR: &str = ".dino-link";

/// Get the ~/.dino-link/ directory path, creating it if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(DATA_DIR);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Full path for a file in ~/.dino-link/.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    Ok(data_dir()?.join(filename))
}

/// Read JSON from `path`. A missing or malformed file yields `T::default()`.
pub fn load_json_from<T: Default + DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed {}: {}", path.display(), e);
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Load a JSON file from ~/.dino-link/, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + DeserializeOwned>(filename: &str) -> T {
    match data_path(filename) {
        Ok(path) => load_json_from(&path),
        Err(_) => T::default(),
    }
}

/// Write `data` as pretty-printed JSON to `path`.
pub fn save_json_to<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

/// Save a value as pretty-printed JSON to ~/.dino-link/. Returns the path written.
pub fn save_json<T: Serialize>(filename: &str, data: &T) -> io::Result<PathBuf> {
    let path = data_path(filename)?;
    save_json_to(&path, data)?;
    Ok(path)
}
