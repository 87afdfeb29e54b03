use thiserror::Error;

/// Core error types for wfblock
#[derive(Debug, Error)]
pub enum Error {
    /// External program could not be started
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// External program ran but reported failure
    #[error("{command} failed{}", .exit_code.map(|c| format!(" with exit code {c}")).unwrap_or_default())]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
    },

    /// Port pair label did not match any known pair
    #[error("Unknown port pair '{0}'")]
    InvalidPortPair(String),

    /// Port range endpoints were rejected
    #[error("Invalid port range: {0}")]
    InvalidPortRange(String),

    /// Auto-recover delay outside 1-999 seconds or not a number
    #[error("Invalid auto-recover delay: {0}")]
    InvalidRecoverDelay(String),

    /// Window icon could not be loaded
    #[error("Failed to load icon {path}: {message}")]
    Icon { path: String, message: String },

    /// Font discovery or loading failed
    #[error("Font error: {0}")]
    Font(String),
}

impl Error {
    /// Exit code reported by the failing command, if any
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
