//! Placeholder expressions: flat property / index paths like `a.b[0].c`.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

/// One step of a [`PlaceholderPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A property name.
    Name(String),
    /// A non-negative integer written in canonical form (`0`, `12`, not `007`).
    Index(usize),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        let canonical = raw == "0" || (!raw.starts_with('0') && raw.bytes().all(|b| b.is_ascii_digit()));
        match raw.parse::<usize>() {
            Ok(index) if canonical => Self::Index(index),
            _ => Self::Name(raw.to_owned()),
        }
    }

    /// The segment as an object key.
    pub fn key(&self) -> Cow<'_, str> {
        match self {
            Self::Name(name) => Cow::Borrowed(name),
            Self::Index(index) => Cow::Owned(index.to_string()),
        }
    }

    /// The segment as a position, for arrays and strings.
    fn position(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Name(_) => None,
        }
    }

    fn is_length(&self) -> bool {
        matches!(self, Self::Name(name) if name == "length")
    }

    /// Keyed access into `value`. `None` when there is nothing at this key.
    fn lookup<'a>(&self, value: &'a Value) -> Option<Cow<'a, Value>> {
        match value {
            Value::Object(map) => map.get(self.key().as_ref()).map(Cow::Borrowed),
            Value::Array(items) if self.is_length() => Some(Cow::Owned(items.len().into())),
            Value::Array(items) => items.get(self.position()?).map(Cow::Borrowed),
            Value::String(s) if self.is_length() => Some(Cow::Owned(s.chars().count().into())),
            Value::String(s) => s
                .chars()
                .nth(self.position()?)
                .map(|c| Cow::Owned(Value::String(c.to_string()))),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// A parsed placeholder expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PlaceholderPath {
    segments: Vec<Segment>,
}

impl PlaceholderPath {
    /// Split `expr` on `.`, `[` and `]`, skipping the empty pieces the
    /// delimiters leave behind.
    pub fn parse(expr: &str) -> Self {
        let segments = expr
            .split(['.', '[', ']'])
            .filter(|piece| !piece.is_empty())
            .map(Segment::parse)
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// `true` when the path has no segments and so names the root itself.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Walk the path from `root`. Returns `None` as soon as a step has
    /// nothing to index into.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<Cow<'a, Value>> {
        let mut current = Cow::Borrowed(root);
        for segment in &self.segments {
            current = match current {
                Cow::Borrowed(value) => segment.lookup(value)?,
                Cow::Owned(value) => Cow::Owned(segment.lookup(&value)?.into_owned()),
            };
        }
        Some(current)
    }
}

impl fmt::Display for PlaceholderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && matches!(segment, Segment::Name(_)) {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
