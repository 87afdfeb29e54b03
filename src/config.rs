//! Runtime configuration
//!
//! wfblock keeps no configuration file. Everything that can be adjusted is
//! read from environment variables at startup:
//!
//! - `WFBLOCK_NETSH`: program used for firewall commands (default `netsh`)
//! - `WFBLOCK_CONSOLE`: program used to open the firewall console (default `mmc.exe`)
//! - `WFBLOCK_ICON`: window icon path (default `WF.ico` in the working directory)
//! - `WFBLOCK_FONT_PATTERN`: font file name fragment to look for (default `msyh.ttc`)
//! - `WFBLOCK_FONT`: explicit font file, skips discovery
//! - `WFBLOCK_LOG`: log level (`error`, `warn`, `info`, `debug`, `trace`)
//! - `WFBLOCK_SKIP_ELEVATION`: do not relaunch as administrator
//! - `WFBLOCK_AUTO_RECOVER`: auto-recover delay in seconds (1-999), or `off`

use crate::core::netsh::{DEFAULT_CONSOLE, DEFAULT_NETSH};
use crate::core::recover::AutoRecover;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;

pub const ENV_NETSH: &str = "WFBLOCK_NETSH";
pub const ENV_CONSOLE: &str = "WFBLOCK_CONSOLE";
pub const ENV_ICON: &str = "WFBLOCK_ICON";
pub const ENV_FONT_PATTERN: &str = "WFBLOCK_FONT_PATTERN";
pub const ENV_FONT: &str = "WFBLOCK_FONT";
pub const ENV_LOG: &str = "WFBLOCK_LOG";
pub const ENV_SKIP_ELEVATION: &str = "WFBLOCK_SKIP_ELEVATION";
pub const ENV_AUTO_RECOVER: &str = "WFBLOCK_AUTO_RECOVER";

pub const DEFAULT_ICON: &str = "WF.ico";
pub const DEFAULT_FONT_PATTERN: &str = "msyh.ttc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub netsh_program: String,
    pub console_program: String,
    pub icon_path: PathBuf,
    pub font_pattern: String,
    /// Font file chosen by the user; discovery is skipped when set
    pub font_path: Option<PathBuf>,
    pub log_level: Level,
    pub skip_elevation: bool,
    /// Initial auto-recover setting for the GUI
    pub auto_recover: AutoRecover,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            netsh_program: DEFAULT_NETSH.to_string(),
            console_program: DEFAULT_CONSOLE.to_string(),
            icon_path: PathBuf::from(DEFAULT_ICON),
            font_pattern: DEFAULT_FONT_PATTERN.to_string(),
            font_path: None,
            log_level: Level::INFO,
            skip_elevation: false,
            auto_recover: AutoRecover::default(),
        }
    }
}

impl AppConfig {
    /// Reads the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset. An unparseable log level or auto-recover
    /// delay falls back to its default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Self {
            netsh_program: get(ENV_NETSH).unwrap_or(defaults.netsh_program),
            console_program: get(ENV_CONSOLE).unwrap_or(defaults.console_program),
            icon_path: get(ENV_ICON).map_or(defaults.icon_path, PathBuf::from),
            font_pattern: get(ENV_FONT_PATTERN).unwrap_or(defaults.font_pattern),
            font_path: get(ENV_FONT).map(PathBuf::from),
            log_level: get(ENV_LOG)
                .and_then(|v| Level::from_str(&v).ok())
                .unwrap_or(defaults.log_level),
            skip_elevation: get(ENV_SKIP_ELEVATION).is_some(),
            auto_recover: get(ENV_AUTO_RECOVER)
                .and_then(|v| AutoRecover::parse(&v).ok())
                .unwrap_or(defaults.auto_recover),
        }
    }
}
