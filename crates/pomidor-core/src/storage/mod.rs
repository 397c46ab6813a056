mod database;
mod store;

pub use database::Database;
pub use store::{keys, MemoryStore, StateStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the data directory, creating it if needed.
///
/// `POMIDOR_DATA_DIR` overrides the location outright; otherwise this is
/// `~/.config/pomidor`, or `~/.config/pomidor-dev` when `POMIDOR_ENV=dev`.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var("POMIDOR_DATA_DIR") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("POMIDOR_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pomidor-dev")
            } else {
                base_dir.join("pomidor")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}
