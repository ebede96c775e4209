use crate::service::generator::ServiceError;

/// Convenience result type used across photoverse.
pub type PhotoverseResult<T> = Result<T, PhotoverseError>;

/// Top-level error taxonomy used by compositor and exporter APIs.
#[derive(thiserror::Error, Debug)]
pub enum PhotoverseError {
    /// Invalid caller-provided data (scale, paths, job files).
    #[error("validation error: {0}")]
    Validation(String),

    /// The source image could not be loaded or decoded.
    #[error("image decode error: {0}")]
    ImageDecode(String),

    /// Serializing or delivering an exported artifact failed.
    #[error("export error: {0}")]
    Export(String),

    /// Another export is still in flight for the same result view.
    #[error("export already in progress")]
    Busy,

    /// The poem generation collaborator failed.
    #[error("poem service error: {0}")]
    Service(#[from] ServiceError),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhotoverseError {
    /// Build a [`PhotoverseError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PhotoverseError::ImageDecode`] value.
    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    /// Build a [`PhotoverseError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`PhotoverseError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether repeating the same operation with the same inputs may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ImageDecode(_) | Self::Export(_) | Self::Busy | Self::Service(_) | Self::Other(_)
        )
    }

    /// Short, transient message suitable for showing to the person who pressed export.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ImageDecode(_) => "The photo could not be loaded. Please try again.",
            Self::Export(_) | Self::Other(_) => "The file could not be generated. Please try again.",
            Self::Busy => "An export is already in progress.",
            Self::Service(_) => "The poem could not be generated right now. Please try again later.",
            Self::Validation(_) | Self::Serde(_) => "The export settings are invalid.",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
