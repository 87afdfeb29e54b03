//! Utility functions for directory management
//!
//! wfblock persists nothing except its log file, which lives in the
//! per-user local data directory:
//!
//! - Windows: `%LOCALAPPDATA%\wfblock\wfblock\data\`
//! - Linux: `~/.local/share/wfblock/`
//!
//! # Example
//!
//! ```
//! use wfblock::utils::{ensure_log_dir, get_log_dir};
//!
//! ensure_log_dir().expect("Failed to create directories");
//!
//! if let Some(log_dir) = get_log_dir() {
//!     // Open the log file in log_dir
//! }
//! ```

use directories::ProjectDirs;
use std::path::PathBuf;

pub const LOG_FILE_NAME: &str = "wfblock.log";

pub fn get_log_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "wfblock", "wfblock").map(|pd| pd.data_local_dir().to_path_buf())
}

pub fn get_log_path() -> Option<PathBuf> {
    get_log_dir().map(|dir| dir.join(LOG_FILE_NAME))
}

pub fn ensure_log_dir() -> std::io::Result<()> {
    if let Some(dir) = get_log_dir() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
