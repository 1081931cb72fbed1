//! Placeholder patterns.
//!
//! A pattern is a regular expression with exactly one capture group (the
//! placeholder expression) that may match a leading backslash. A match that
//! starts with a backslash is an escaped placeholder and is emitted
//! literally.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::error::PatternError;

/// Source of the default `#{expression}` syntax.
pub const DEFAULT_PATTERN: &str = r"\\?#\{(.*?)\}";

/// Group the old syntax used to capture the character before a placeholder.
const LEGACY_PREFIX: &str = r"(^|.|\r|\n)";

static DEFAULT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_PATTERN).expect("default placeholder pattern compiles"));

/// A compiled placeholder syntax.
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern in the current syntax.
    pub fn new(source: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(source).map_err(|e| PatternError::InvalidRegex {
            source_text: source.to_owned(),
            reason: e.to_string(),
        })?;

        let found = regex.captures_len() - 1;
        if found != 1 {
            return Err(PatternError::CaptureGroups {
                source_text: source.to_owned(),
                found,
            });
        }

        trace!(pattern = source, "compiled placeholder pattern");
        Ok(Self { regex })
    }

    /// Compile a pattern written in the old syntax, which captured the
    /// character preceding the placeholder instead of an optional backslash:
    ///
    /// ```text
    /// (^|.|\r|\n)(<%=\s*(\w+)\s*%>)   becomes   \\?<%=\s*(\w+)\s*%>
    /// ```
    pub fn legacy(source: &str) -> Result<Self, PatternError> {
        Self::new(&rewrite_legacy(source))
    }

    /// Compile `source`, rewriting it first when it is in the old syntax.
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        if is_legacy(source) {
            Self::legacy(source)
        } else {
            Self::new(source)
        }
    }

    /// The regular expression source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self {
            regex: DEFAULT_REGEX.clone(),
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `true` if `source` starts with the old preceding-character group.
pub fn is_legacy(source: &str) -> bool {
    source.starts_with(LEGACY_PREFIX)
}

/// Turn an old-syntax source into the current syntax: the preceding-character
/// group becomes an optional backslash, and the group wrapping the whole
/// placeholder (first `(` through last `)`) loses its parentheses.
pub fn rewrite_legacy(source: &str) -> String {
    let escaped = source.replacen(LEGACY_PREFIX, r"\\?", 1);
    match (escaped.find('('), escaped.rfind(')')) {
        (Some(open), Some(close)) if open < close => format!(
            "{}{}{}",
            &escaped[..open],
            &escaped[open + 1..close],
            &escaped[close + 1..]
        ),
        _ => escaped,
    }
}
