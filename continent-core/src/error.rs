//! Classified lookup failures.

use thiserror::Error;

/// Coarse failure category; drives the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Network,
    Parse,
    Schema,
    Unclassified,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no continent given")]
    EmptyRegion,

    #[error("unknown continent '{0}'")]
    UnknownRegion(String),

    #[error("request to weather service failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("weather service answered with status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("weather service returned invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("weather service response is missing current conditions: {0}")]
    Schema(String),

    #[error(transparent)]
    Unclassified(#[from] anyhow::Error),
}

impl LookupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyRegion | Self::UnknownRegion(_) => ErrorKind::Validation,
            Self::Network(_) | Self::HttpStatus { .. } => ErrorKind::Network,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Schema(_) => ErrorKind::Schema,
            Self::Unclassified(_) => ErrorKind::Unclassified,
        }
    }

    /// Single-line message suitable for showing to the person who asked.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyRegion => "Please select a valid continent".to_string(),
            Self::UnknownRegion(name) => {
                format!("Continent '{name}' not found in our database")
            }
            Self::Network(_) | Self::HttpStatus { .. } => {
                "Network error: Please check your internet connection".to_string()
            }
            Self::Parse(_) => "Error: Invalid response from weather service".to_string(),
            Self::Schema(detail) => {
                format!("Error: Incomplete response from weather service ({detail})")
            }
            Self::Unclassified(cause) => format!("Error: {cause:#}"),
        }
    }
}
