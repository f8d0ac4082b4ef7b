use miette::Diagnostic;
use thiserror::Error;

use crate::core::{ParseError, Provider};

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("AI provider error: {0}")]
    Provider(String),

    #[error("Missing API key. Set one of: {}", .0.key_vars().join(", "))]
    MissingApiKey(Provider),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid classifier pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Server error: {0}")]
    Server(String),
}

// why a symptom report did not produce a diagnosis
#[derive(Error, Diagnostic, Debug)]
pub enum Rejection {
    #[error("{0}")]
    InvalidInput(String),

    #[error(
        "This service is only for medical symptoms and health-related queries. \
         Please provide valid medical symptoms or health concerns."
    )]
    OutOfScope,

    #[error("Failed to parse cleaned AI response.")]
    UpstreamParseFailure(#[source] ParseError),

    #[error("Something went wrong.")]
    UpstreamUnavailable(String),
}

impl Rejection {
    /// Stable name sent to clients next to the message.
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::OutOfScope => "out_of_scope",
            Self::UpstreamParseFailure(_) => "upstream_parse_failure",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
        }
    }

    /// The user can fix these by changing what they typed.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::OutOfScope)
    }

    // longer text for places that can show it (tui, cli), never sent over http
    pub fn detail(&self) -> String {
        match self {
            Self::UpstreamParseFailure(e) => e.to_string(),
            Self::UpstreamUnavailable(cause) => format!("AI provider unavailable: {cause}"),
            other => other.to_string(),
        }
    }
}
