/// Crate-wide result alias.
pub type SoxResult<T> = Result<T, SoxError>;

/// Errors raised while building or running an effect chain.
#[derive(thiserror::Error, Debug)]
pub enum SoxError {
    /// A parameter is outside its documented type, range, or enumeration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The effect exists in SoX but has no builder here.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// The engine ran and returned a non-zero exit status.
    #[error("sox exited with status {status}\nstdout: {}\nstderr: {}", .stdout.as_deref().unwrap_or(""), .stderr.as_deref().unwrap_or(""))]
    Engine {
        /// Process exit status (`-1` when terminated by a signal).
        status: i32,
        /// Captured standard output, if any.
        stdout: Option<String>,
        /// Captured standard error, if any.
        stderr: Option<String>,
    },

    /// Input is missing/unreadable or the output destination is unwritable.
    #[error("path error: {0}")]
    Path(String),

    /// A chain description could not be parsed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else (process spawn, I/O).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SoxError {
    /// Build a [`SoxError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SoxError::Unsupported`] for the named effect.
    pub fn unsupported(effect: &'static str) -> Self {
        Self::Unsupported(effect)
    }

    /// Build a [`SoxError::Path`].
    pub fn path(msg: impl Into<String>) -> Self {
        Self::Path(msg.into())
    }

    /// Build a [`SoxError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for [`SoxError::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
