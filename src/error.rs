use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// Background image missing or unreadable. Never shown to the user.
    #[error("asset unavailable at {path}: {reason}")]
    AssetUnavailable { path: String, reason: String },

    #[error("{command} failed: {message}")]
    CommandFailure {
        command: &'static str,
        message: String,
    },

    #[error("shell unavailable: {0}")]
    ShellUnavailable(String),
}

impl SyncError {
    pub fn command(command: &'static str, err: impl std::fmt::Display) -> Self {
        SyncError::CommandFailure {
            command,
            message: err.to_string(),
        }
    }

    pub fn shell(err: impl std::fmt::Display) -> Self {
        SyncError::ShellUnavailable(err.to_string())
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
