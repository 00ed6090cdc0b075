use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmiError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl EmiError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        EmiError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The human-readable reason, without the field prefix.
    pub fn reason(&self) -> &str {
        match self {
            EmiError::InvalidInput { reason, .. } => reason,
            EmiError::SerializationError(msg) => msg,
        }
    }
}

impl From<serde_json::Error> for EmiError {
    fn from(e: serde_json::Error) -> Self {
        EmiError::SerializationError(e.to_string())
    }
}

#[cfg(feature = "export")]
impl From<csv::Error> for EmiError {
    fn from(e: csv::Error) -> Self {
        EmiError::SerializationError(e.to_string())
    }
}
