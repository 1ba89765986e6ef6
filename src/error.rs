//! Error types

/// Errors raised while loading or configuring a scene
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// Level data is missing a list or holds an entry that is not a 3-vector
    #[error("malformed level data: {0}")]
    MalformedLevelData(String),
    #[error("unknown level: {0}")]
    UnknownLevel(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// Geometry or pixels from the asset loader do not match their description
    #[error("invalid asset: {0}")]
    InvalidAsset(String),
    /// Programmer error; should never surface during play
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SceneError>;
