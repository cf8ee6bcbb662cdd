/// Result alias used across fallible graphshot infrastructure.
pub type GraphshotResult<T> = Result<T, GraphshotError>;

/// Errors raised by loading, rendering and encoding.
///
/// Snapshot composition itself never surfaces these; it collapses every failure into `None`.
#[derive(thiserror::Error, Debug)]
pub enum GraphshotError {
    /// Input failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// A drawing surface could not be allocated or rendered.
    #[error("render error: {0}")]
    Render(String),

    /// Image encoding failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with context preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GraphshotError {
    /// Build a [`GraphshotError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GraphshotError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GraphshotError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`GraphshotError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GraphshotError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
