/// Convenience result type used across cardfx.
pub type CardFxResult<T> = Result<T, CardFxError>;

/// Error taxonomy for construction and loading paths.
///
/// Live editing (parameter writes, preset sequencing, compositing) never surfaces these;
/// it recovers locally and logs instead.
#[derive(thiserror::Error, Debug)]
pub enum CardFxError {
    /// Invalid catalog, config, or value data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed preset definitions.
    #[error("preset error: {0}")]
    Preset(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardFxError {
    /// Build a [`CardFxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardFxError::Preset`] value.
    pub fn preset(msg: impl Into<String>) -> Self {
        Self::Preset(msg.into())
    }

    /// Build a [`CardFxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
