//! Tamil-script input validation.
//!
//! The check runs before any request leaves the process. Input passes only
//! when, after trimming, it is non-empty and every character is in the Tamil
//! Unicode block or the small whitelist of whitespace and `. , ? !`.

use std::ops::RangeInclusive;

use thiserror::Error;

/// The Tamil Unicode block.
pub const TAMIL_BLOCK: RangeInclusive<char> = '\u{0B80}'..='\u{0BFF}';

/// Fixed message shown to the user when validation fails.
pub const NOT_TAMIL_MESSAGE: &str = "Error: The input is not in Tamil. Please provide Tamil text.";

/// Returned when input is not (entirely) Tamil script.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("{}", NOT_TAMIL_MESSAGE)]
pub struct ValidationError;

impl ValidationError {
    /// Returns the user-facing rejection message.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        NOT_TAMIL_MESSAGE
    }
}

/// Validates that `text` is Tamil script.
///
/// # Errors
///
/// Returns [`ValidationError`] if the trimmed text is empty or contains any
/// character outside the Tamil block and the whitelist.
pub fn validate(text: &str) -> Result<(), ValidationError> {
    if is_tamil_text(text) {
        Ok(())
    } else {
        Err(ValidationError)
    }
}

/// Returns `true` when `text` passes the Tamil-script policy.
#[must_use]
pub fn is_tamil_text(text: &str) -> bool {
    let trimmed = text.trim_matches(is_script_whitespace);
    !trimmed.is_empty() && trimmed.chars().all(is_permitted)
}

fn is_permitted(c: char) -> bool {
    TAMIL_BLOCK.contains(&c) || is_script_whitespace(c) || matches!(c, '.' | ',' | '?' | '!')
}

// ECMAScript `\s`: Unicode White_Space minus NEL, plus the byte order mark.
fn is_script_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{0085}') || c == '\u{FEFF}'
}
