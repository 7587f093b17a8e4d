/// Core error types for the Kinema engine.

/// A specialized Result type for Kinema operations.
pub type KinemaResult<T> = Result<T, KinemaError>;

/// Top-level error type encompassing all Kinema subsystems.
#[derive(Debug, thiserror::Error)]
pub enum KinemaError {
    #[error("unknown animation preset: {0}")]
    UnknownPreset(String),

    #[error("export error: {0}")]
    Export(String),

    #[error("color error: {0}")]
    Color(#[from] crate::color::ColorError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
