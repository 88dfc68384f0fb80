//! Data directory resolution
//!
//! - Release: `<platform data dir>/Shabda/` (e.g. `~/.local/share/Shabda`)
//! - Development: a `data/` folder next to the project if one exists
//! - `SHABDA_DATA_DIR` overrides both

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "Shabda";
const SETTINGS_DB_NAME: &str = "settings.db";

/// Get the data directory (not created)
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SHABDA_DATA_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    #[cfg(debug_assertions)]
    {
        let dev_paths = [PathBuf::from("data"), PathBuf::from("../data")];
        for path in &dev_paths {
            if path.join(SETTINGS_DB_NAME).exists() {
                return path.canonicalize().unwrap_or_else(|_| path.clone());
            }
        }
    }

    dirs::data_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Settings database path inside the given data directory
pub fn settings_db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SETTINGS_DB_NAME)
}

/// Make sure the data directory exists
pub fn ensure_data_dir(data_dir: &Path) -> Result<()> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", data_dir))
}
