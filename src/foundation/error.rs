/// Convenience result type used across playmat.
pub type PlaymatResult<T> = Result<T, PlaymatError>;

/// Top-level error taxonomy used by editor and renderer APIs.
///
/// Asset decode failures are usually recovered locally (see [`crate::AssetState`]) and only
/// surface as [`PlaymatError::Decode`] when a caller asks for a decoded asset directly.
#[derive(thiserror::Error, Debug)]
pub enum PlaymatError {
    /// Invalid user-provided or document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An export was requested for a document that has no background image.
    #[error("missing background: a background image must be set before exporting")]
    MissingBackground,

    /// An asset could not be resolved or decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors raised while drawing onto a raster target.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlaymatError {
    /// Build a [`PlaymatError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PlaymatError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PlaymatError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PlaymatError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
