/// Convenience result type used across the crate.
pub type FieldResult<T> = Result<T, FieldError>;

/// Error taxonomy for boundary operations.
///
/// Per-tick work (synthesis, gradient lookup, timeline evaluation, playback advance) never
/// returns this type. Only mutations and file IO can fail, and they fail by rejecting the
/// change and leaving prior state intact.
#[derive(thiserror::Error, Debug)]
pub enum FieldError {
    /// Configuration input that cannot be clamped into range.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed or wrong-version timeline / gradient preset document.
    #[error("parse error: {0}")]
    Parse(String),

    /// A mutation that would break a collection invariant.
    #[error("invariant violation: {0}")]
    Invariant(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FieldError {
    /// Build a [`FieldError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FieldError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`FieldError::Invariant`] value.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
