//! Field validation rules
//!
//! Every rule is a pure function of the field kind and its current value.

use super::field::{FieldKind, FieldValue};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Letters (ASCII, Latin-1 and Latin Extended-A, without × and ÷), whitespace, hyphen, apostrophe
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z\x{00C0}-\x{00D6}\x{00D8}-\x{00F6}\x{00F8}-\x{017F}\s'-]{2,50}$")
        .expect("name pattern is valid")
});

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+0-9\s()-]{10,20}$").expect("phone pattern is valid"));

/// Minimum message length after trimming
pub const MESSAGE_MIN_CHARS: usize = 10;

/// Why a field failed validation. `Display` is the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{}", .0.required_message())]
    Required(FieldKind),
    #[error("{}", .0.pattern_message())]
    Pattern(FieldKind),
    #[error("Musíte súhlasiť so spracovaním údajov")]
    ConsentNotGiven,
}

/// Validate `value` against the rule for `kind`
pub fn validate(kind: FieldKind, value: FieldValue<'_>) -> Result<(), FieldError> {
    if kind == FieldKind::Consent {
        return if value.is_checked() {
            Ok(())
        } else {
            Err(FieldError::ConsentNotGiven)
        };
    }

    // Optional only when nothing at all was typed; blanks still go through the pattern
    if kind == FieldKind::Phone && value.is_empty() {
        return Ok(());
    }

    let text = value.as_text();
    if text.is_empty() && kind != FieldKind::Phone {
        return Err(FieldError::Required(kind));
    }

    let matches = match kind {
        FieldKind::PersonalName => NAME_PATTERN.is_match(text),
        FieldKind::Email => EMAIL_PATTERN.is_match(text),
        FieldKind::Phone => PHONE_PATTERN.is_match(text),
        FieldKind::RequiredText => true,
        FieldKind::LongMessage => text.chars().count() >= MESSAGE_MIN_CHARS,
        FieldKind::Consent => value.is_checked(),
    };

    if matches {
        Ok(())
    } else {
        Err(FieldError::Pattern(kind))
    }
}
