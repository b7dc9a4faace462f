//! Unified error type for the helper crate
//!
//! Absent inputs are never errors. Only malformed text (numbers, dates,
//! patterns, enum names) surfaces here.

use thiserror::Error;

/// Unified error type for helper operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HelperError {
    /// A string could not be parsed as the requested numeric type
    #[error("Cannot parse '{input}' as {target}: {reason}")]
    NumberParse {
        input: String,
        target: &'static str,
        reason: String,
    },

    /// A string did not match the date pattern it was parsed with
    #[error("Cannot parse '{input}' with pattern '{pattern}': {reason}")]
    DateParse {
        input: String,
        pattern: String,
        reason: String,
    },

    /// The date pattern itself is malformed
    #[error("Invalid date pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A string did not name any variant of an enum-like type
    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    /// Rendering a value failed
    #[error("Format error: {0}")]
    Format(String),
}

impl HelperError {
    /// Create a number parse error
    pub fn number_parse(
        input: impl Into<String>,
        target: &'static str,
        reason: impl ToString,
    ) -> Self {
        Self::NumberParse {
            input: input.into(),
            target,
            reason: reason.to_string(),
        }
    }

    /// Create a date parse error
    pub fn date_parse(
        input: impl Into<String>,
        pattern: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::DateParse {
            input: input.into(),
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown variant error
    pub fn unknown_variant(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }

    /// Whether this error came from parsing malformed input text.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::NumberParse { .. } | Self::DateParse { .. })
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, HelperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_parse_message() {
        let err = HelperError::number_parse("5,0", "i32", "invalid digit found in string");
        assert_eq!(
            err.to_string(),
            "Cannot parse '5,0' as i32: invalid digit found in string"
        );
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_invalid_pattern_is_not_parse_error() {
        let err = HelperError::invalid_pattern("iii", "unsupported letter 'i'");
        assert!(!err.is_parse_error());
        assert!(err.to_string().contains("iii"));
    }

    #[test]
    fn test_unknown_variant_message() {
        let err = HelperError::unknown_variant("comparator", "sideways");
        assert_eq!(err.to_string(), "Unknown comparator: 'sideways'");
    }
}
