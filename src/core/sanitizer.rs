// turns raw model text into a diagnosis
// models like to wrap json in markdown fences, sometimes with a sentence around it

use crate::core::diagnosis::DiagnosisResult;
use thiserror::Error;

const FENCE: &str = "```";

/// Sanitizing failed. `cleaned` is the text we actually tried to parse.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("could not parse AI response: {reason}")]
pub struct ParseError {
    pub cleaned: String,
    pub reason: String,
}

impl ParseError {
    fn new(cleaned: &str, reason: impl Into<String>) -> Self {
        Self {
            cleaned: cleaned.to_string(),
            reason: reason.into(),
        }
    }
}

/// Strip a leading fence (with optional language tag) and a trailing fence, then trim.
pub fn clean(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(rest.len());
        text = &rest[tag_len..];
    }

    let trimmed = text.trim_end();
    text = trimmed.strip_suffix(FENCE).unwrap_or(trimmed);

    text.trim()
}

pub fn extract(raw: &str) -> Result<DiagnosisResult, ParseError> {
    let cleaned = clean(raw);

    let result = match serde_json::from_str::<DiagnosisResult>(cleaned) {
        Ok(result) => result,
        Err(strict) => {
            // a preamble or trailing remark around the object; try just the object
            let span = embedded_object(cleaned)
                .filter(|span| span.len() < cleaned.len())
                .ok_or_else(|| ParseError::new(cleaned, strict.to_string()))?;

            serde_json::from_str(span).map_err(|_| ParseError::new(cleaned, strict.to_string()))?
        }
    };

    result
        .validate()
        .map_err(|reason| ParseError::new(cleaned, reason))?;

    Ok(result)
}

// first '{' through last '}'
fn embedded_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}
