use inkwell_types::MAX_CONTENT_CHARS;
use thiserror::Error;

/// Rejections for submitted content. The messages are sent to the client as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Content cannot be empty")]
    Empty,
    #[error("Content too long (max {max} chars)")]
    TooLong { max: usize },
}

/// Check submitted content before it goes anywhere near the store.
/// Length is counted in characters, so multi-byte text gets the full allowance.
pub fn validate_content(content: &str) -> Result<&str, ValidationError> {
    if content.is_empty() {
        return Err(ValidationError::Empty);
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(ValidationError::TooLong {
            max: MAX_CONTENT_CHARS,
        });
    }
    Ok(content)
}
