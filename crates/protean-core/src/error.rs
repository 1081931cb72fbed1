//! Unified error handling for Protean Core.
//!
//! Comparing values that have no ordering is the only runtime failure.
//! Compiling a template pattern and parsing native values from text can
//! fail up front; template evaluation itself never fails.

use thiserror::Error;

use crate::native::NativeKind;

/// Raised when `compare_to` yields no ordering for a pair of operands.
///
/// Both operands are kept as their rendered form so the error stays
/// `Clone + Send + Sync` regardless of the compared type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Comparison of {left} with {right} failed")]
pub struct ComparisonError {
    /// Rendering of the receiver.
    pub left: String,
    /// Rendering of the argument.
    pub right: String,
}

impl ComparisonError {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

/// Errors raised while compiling a placeholder pattern.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Invalid placeholder pattern '{source_text}': {reason}")]
    InvalidRegex { source_text: String, reason: String },

    #[error(
        "Placeholder pattern '{source_text}' must have exactly one capture group, found {found}"
    )]
    CaptureGroups { source_text: String, found: usize },
}

/// Errors raised while reading a native value from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("'{input}' is not a valid {kind}")]
    Parse { kind: NativeKind, input: String },

    #[error("Unknown value kind '{0}'")]
    UnknownKind(String),
}

/// Root error type for Protean Core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProteanError {
    /// Two values could not be ordered against each other.
    #[error(transparent)]
    Comparison(#[from] ComparisonError),

    /// A template pattern could not be compiled.
    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// Text could not be read as a native value.
    #[error("Value error: {0}")]
    Value(#[from] ValueError),
}

impl ProteanError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Comparison(e) => vec![
                format!("{} and {} have no common ordering", e.left, e.right),
                "Compare values of the same kind (number, string, boolean, date)".into(),
            ],
            Self::Pattern(PatternError::InvalidRegex { reason, .. }) => vec![
                format!("The regular expression did not compile: {reason}"),
                r"The default syntax is \\?#\{(.*?)\}".into(),
            ],
            Self::Pattern(PatternError::CaptureGroups { .. }) => vec![
                "Use a single capture group for the placeholder expression".into(),
                "Turn extra groups into non-capturing ones: (?:...)".into(),
            ],
            Self::Value(ValueError::Parse { kind, .. }) => vec![
                format!("The input does not look like a {kind}"),
                "Omit the kind to let it be detected from the text".into(),
            ],
            Self::Value(ValueError::UnknownKind(_)) => {
                vec!["Known kinds: number, string, boolean, date".into()]
            }
        }
    }

    /// Error category for display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Comparison(_) => ErrorCategory::Comparison,
            Self::Pattern(_) | Self::Value(_) => ErrorCategory::Validation,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Comparison,
    Validation,
}

/// Convenient result type alias.
pub type ProteanResult<T> = Result<T, ProteanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_message_embeds_both_operands() {
        let err = ComparisonError::new("5", "'five'");
        assert_eq!(err.to_string(), "Comparison of 5 with 'five' failed");
    }

    #[test]
    fn root_error_is_transparent_for_comparisons() {
        let err: ProteanError = ComparisonError::new("a", "b").into();
        assert_eq!(err.to_string(), "Comparison of a with b failed");
        assert_eq!(err.category(), ErrorCategory::Comparison);
    }

    #[test]
    fn pattern_errors_are_validation() {
        let err: ProteanError = PatternError::CaptureGroups {
            source_text: "(a)(b)".into(),
            found: 2,
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.suggestions().iter().any(|s| s.contains("(?:")));
    }
}
