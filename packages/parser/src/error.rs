//! Error types for the parser.
//!
//! Parsing itself never fails: every line ends up in exactly one handling
//! branch or is dropped. The only fallible step is turning a [`Grammar`]
//! into a working parser.
//!
//! [`Grammar`]: crate::grammar::Grammar

use thiserror::Error;

/// Main error type for the parser library.
#[derive(Debug, Error)]
pub enum ParserError {
    /// A keyword table the classifier depends on is empty.
    #[error("Grammar field '{0}' must not be empty")]
    EmptyKeywordSet(&'static str),

    /// A grammar pattern failed to compile.
    #[error("Invalid pattern in grammar field '{field}': {source}")]
    InvalidPattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },

    /// A numeric grammar limit is out of range.
    #[error("Grammar field '{field}' has invalid value {value}")]
    InvalidLimit { field: &'static str, value: usize },
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_keyword_set_display() {
        let err = ParserError::EmptyKeywordSet("ordinals");
        assert_eq!(err.to_string(), "Grammar field 'ordinals' must not be empty");
    }

    #[test]
    fn test_invalid_pattern_display() {
        #[allow(clippy::unwrap_used)]
        let source = regex::Regex::new("(").unwrap_err();
        let err = ParserError::InvalidPattern {
            field: "card_label_pattern",
            source,
        };
        assert!(err.to_string().contains("card_label_pattern"));
    }

    #[test]
    fn test_invalid_limit_display() {
        let err = ParserError::InvalidLimit {
            field: "ordinal_max_tokens",
            value: 0,
        };
        assert_eq!(
            err.to_string(),
            "Grammar field 'ordinal_max_tokens' has invalid value 0"
        );
    }
}
