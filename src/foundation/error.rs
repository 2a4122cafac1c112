use std::path::PathBuf;

/// Result alias used across rtnpr.
pub type RtnprResult<T> = Result<T, RtnprError>;

/// Every failure a run can report.
#[derive(thiserror::Error, Debug)]
pub enum RtnprError {
    /// Mesh path does not exist.
    #[error("file not found: '{}'", .0.display())]
    FileNotFound(PathBuf),

    /// Mesh path does not end in `.obj`.
    #[error("unsupported format: '{}' is not an obj file", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Mesh file is not a plain triangle OBJ.
    #[error("malformed mesh (line {line}): {reason}")]
    MalformedMesh {
        /// 1-based line number, 0 when not tied to a line.
        line: usize,
        /// What was wrong.
        reason: String,
    },

    /// Engine returned an empty, mis-sized or NaN buffer.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// Invalid options or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure reported by the engine.
    #[error("engine error: {0}")]
    Engine(String),

    /// Image or video output failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RtnprError {
    /// Build a [`RtnprError::MalformedMesh`] value.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedMesh {
            line,
            reason: reason.into(),
        }
    }

    /// Build a [`RtnprError::InvalidFrame`] value.
    pub fn invalid_frame(msg: impl Into<String>) -> Self {
        Self::InvalidFrame(msg.into())
    }

    /// Build a [`RtnprError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RtnprError::Engine`] value.
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Build a [`RtnprError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
