/// Convenience result type used across Lectern.
pub type LecternResult<T> = Result<T, LecternError>;

/// Generic message callers should show instead of raw error text.
pub const USER_FACING_FAILURE: &str = "could not generate document";

/// Top-level error taxonomy used by engine APIs.
///
/// Only structurally invalid input and container-writing failures surface here. Cosmetic
/// problems (truncation, force-placement, contrast fallback) are reported as
/// [`Degradation`](crate::Degradation) values instead.
#[derive(thiserror::Error, Debug)]
pub enum LecternError {
    /// Invalid user-provided plan or options.
    #[error("validation error: {0}")]
    Validation(String),

    /// Geometry that makes layout meaningless (e.g. a zero-size content frame).
    #[error("layout error: {0}")]
    Layout(String),

    /// Errors while writing an output container.
    #[error("emit error: {0}")]
    Emit(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LecternError {
    /// Build a [`LecternError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LecternError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`LecternError::Emit`] value.
    pub fn emit(msg: impl Into<String>) -> Self {
        Self::Emit(msg.into())
    }

    /// Build a [`LecternError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the request itself was at fault (as opposed to an output or IO failure).
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Layout(_) | Self::Serde(_))
    }

    /// Message safe to show an end user; never leaks internal detail.
    pub fn user_message(&self) -> &'static str {
        USER_FACING_FAILURE
    }
}

impl From<serde_json::Error> for LecternError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
