//! CJK font discovery
//!
//! The UI text is Traditional Chinese, which the bundled iced font cannot
//! render. At startup the system fonts are scanned for a file whose name
//! contains the configured pattern (`msyh.ttc` by default). The path is
//! handed to the GUI through `WFBLOCK_FONT`, which is cleared again once the
//! font has been read and before the window is created.

use crate::config::ENV_FONT;
use crate::core::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A system font file that matched the discovery pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontCandidate {
    pub path: PathBuf,
    pub family: Option<String>,
}

/// Font bytes ready to be registered with iced
#[derive(Debug, Clone)]
pub struct LoadedFont {
    pub bytes: Vec<u8>,
    pub family: Option<String>,
    pub path: PathBuf,
}

impl LoadedFont {
    /// iced font handle for the loaded family, if it has one
    pub fn to_font(&self) -> Option<iced::Font> {
        // iced needs a 'static family name; this runs once per process
        self.family
            .as_ref()
            .map(|name| iced::Font::with_name(Box::leak(name.clone().into_boxed_str())))
    }
}

/// Case-insensitive match of `pattern` against the file name of `path`
pub fn matches_pattern(path: &Path, pattern: &str) -> bool {
    path.file_name()
        .map(|name| {
            name.to_string_lossy()
                .to_lowercase()
                .contains(&pattern.to_lowercase())
        })
        .unwrap_or(false)
}

/// Returns the first face in `db` whose file name matches `pattern`
pub fn find_in(db: &fontdb::Database, pattern: &str) -> Option<FontCandidate> {
    db.faces().find_map(|face| {
        let path = match &face.source {
            fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => path,
            fontdb::Source::Binary(_) => return None,
        };
        debug!("Font: {}", path.display());
        matches_pattern(path, pattern).then(|| FontCandidate {
            path: path.clone(),
            family: face.families.first().map(|(name, _)| name.clone()),
        })
    })
}

/// Scans the installed system fonts for `pattern`
pub fn discover(pattern: &str) -> Option<FontCandidate> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    debug!("Scanning {} system font faces for {}", db.len(), pattern);
    find_in(&db, pattern)
}

/// Publishes the font path for the GUI in `WFBLOCK_FONT`.
///
/// A path the user already exported wins over discovery. Returns the path
/// that ends up published.
pub fn publish(config: &crate::config::AppConfig) -> Option<PathBuf> {
    let path = match &config.font_path {
        Some(path) => path.clone(),
        None => discover(&config.font_pattern)?.path,
    };

    // SAFETY: called during startup before the GUI or any worker threads exist
    unsafe {
        std::env::set_var(ENV_FONT, &path);
    }
    info!("{}: {}", ENV_FONT, path.display());
    Some(path)
}

/// Reads the published font and clears `WFBLOCK_FONT`.
///
/// Returns `Ok(None)` when nothing was published.
///
/// # Errors
///
/// Returns `Err` if the published file cannot be read.
pub fn take_published() -> Result<Option<LoadedFont>> {
    let Some(path) = std::env::var_os(ENV_FONT).map(PathBuf::from) else {
        return Ok(None);
    };

    // SAFETY: called during startup before the GUI or any worker threads exist
    unsafe {
        std::env::remove_var(ENV_FONT);
    }

    let bytes = std::fs::read(&path)
        .map_err(|e| Error::Font(format!("cannot read {}: {e}", path.display())))?;

    let mut db = fontdb::Database::new();
    db.load_font_data(bytes.clone());
    let family = db
        .faces()
        .next()
        .and_then(|face| face.families.first().map(|(name, _)| name.clone()));

    Ok(Some(LoadedFont {
        bytes,
        family,
        path,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_helpers::ENV_VAR_MUTEX;

    #[test]
    fn test_matches_pattern_on_file_name() {
        assert!(matches_pattern(
            Path::new("C:/Windows/Fonts/msyh.ttc"),
            "msyh.ttc"
        ));
        assert!(matches_pattern(
            Path::new("C:/Windows/Fonts/MSYH.TTC"),
            "msyh.ttc"
        ));
        assert!(!matches_pattern(
            Path::new("C:/Windows/Fonts/msyhbd.ttc"),
            "msyh.ttc"
        ));
        assert!(!matches_pattern(
            Path::new("/usr/share/fonts/msyh.ttc.d/other.ttf"),
            "msyh.ttc"
        ));
    }

    #[test]
    fn test_find_in_empty_database() {
        let db = fontdb::Database::new();
        assert_eq!(find_in(&db, "msyh.ttc"), None);
    }

    #[test]
    fn test_take_published_without_variable() {
        let _guard = ENV_VAR_MUTEX.lock().unwrap();
        unsafe {
            std::env::remove_var(ENV_FONT);
        }
        assert!(take_published().unwrap().is_none());
    }

    #[test]
    fn test_take_published_clears_variable_even_on_error() {
        let _guard = ENV_VAR_MUTEX.lock().unwrap();
        unsafe {
            std::env::set_var(ENV_FONT, "/nonexistent/wfblock/msyh.ttc");
        }

        let result = take_published();

        assert!(matches!(result, Err(Error::Font(_))));
        assert!(std::env::var_os(ENV_FONT).is_none());
    }

    #[test]
    fn test_publish_prefers_configured_path() {
        let _guard = ENV_VAR_MUTEX.lock().unwrap();
        let config = crate::config::AppConfig {
            font_path: Some(PathBuf::from("/tmp/wfblock-test-font.ttc")),
            ..Default::default()
        };

        let published = publish(&config);

        assert_eq!(published, Some(PathBuf::from("/tmp/wfblock-test-font.ttc")));
        assert_eq!(
            std::env::var_os(ENV_FONT).map(PathBuf::from),
            Some(PathBuf::from("/tmp/wfblock-test-font.ttc"))
        );
        unsafe {
            std::env::remove_var(ENV_FONT);
        }
    }
}
