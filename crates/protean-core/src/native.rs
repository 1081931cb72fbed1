//! Comparable for native values: numbers, strings, booleans and dates.
//!
//! # Design
//!
//! Rust's own scalar types implement [`Comparable`] directly, so `3.compare_to(&4)`
//! works without a wrapper. Where the kind of a value is only known at runtime
//! (parsed input, mixed collections) use [`NativeValue`], which fences
//! comparisons by kind: a number never orders against a date.
//!
//! Floating point values get a total order. NaN equals NaN and sorts after
//! everything else, including positive infinity.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::comparable::Comparable;
use crate::error::ValueError;

// ── Numbers ──────────────────────────────────────────────────────────────────

/// Total order over `f64`: NaN is equal to itself and greater than every
/// other value; `-0.0` and `0.0` are equal.
pub fn compare_f64(left: f64, right: f64) -> Ordering {
    match (left.is_nan(), right.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
    }
}

/// Render a number the way a dynamic runtime prints it: `5` rather than
/// `5.0`, `Infinity`, `NaN`, and exponent notation outside `1e-6..1e21`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".into();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    if n == 0.0 {
        return "0".into();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }
    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

impl Comparable for f64 {
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        Some(compare_f64(*self, *other))
    }

    fn inspect(&self) -> String {
        format_number(*self)
    }
}

impl Comparable for f32 {
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        Some(compare_f64(f64::from(*self), f64::from(*other)))
    }

    fn inspect(&self) -> String {
        format_number(f64::from(*self))
    }
}

macro_rules! comparable_by_ord {
    ($($t:ty),* $(,)?) => {
        $(
            impl Comparable for $t {
                fn compare_to(&self, other: &Self) -> Option<Ordering> {
                    Some(self.cmp(other))
                }
            }
        )*
    };
}

comparable_by_ord!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, NaiveDate,
    NaiveDateTime,
);

// ── Strings ──────────────────────────────────────────────────────────────────

/// Quote a string for diagnostics: `'it\'s'`.
pub fn inspect_str(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

impl Comparable for str {
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }

    fn inspect(&self) -> String {
        inspect_str(self)
    }
}

impl Comparable for String {
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        Some(self.as_str().cmp(other.as_str()))
    }

    fn inspect(&self) -> String {
        inspect_str(self)
    }
}

// ── Dates ────────────────────────────────────────────────────────────────────

/// Dates order by their instant in epoch milliseconds; the offset they
/// carry plays no part.
impl<Tz: TimeZone> Comparable for DateTime<Tz> {
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        Some(self.timestamp_millis().cmp(&other.timestamp_millis()))
    }

    fn inspect(&self) -> String {
        self.with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

// ── NativeValue ──────────────────────────────────────────────────────────────

/// The runtime kind of a [`NativeValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NativeKind {
    Number,
    String,
    Boolean,
    Date,
}

impl NativeKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for NativeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NativeKind {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "number" | "num" => Ok(Self::Number),
            "string" | "str" => Ok(Self::String),
            "boolean" | "bool" => Ok(Self::Boolean),
            "date" => Ok(Self::Date),
            other => Err(ValueError::UnknownKind(other.into())),
        }
    }
}

/// A value whose kind is only known at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum NativeValue {
    Number(f64),
    String(String),
    Boolean(bool),
    Date(DateTime<Utc>),
}

impl NativeValue {
    pub fn kind(&self) -> NativeKind {
        match self {
            Self::Number(_) => NativeKind::Number,
            Self::String(_) => NativeKind::String,
            Self::Boolean(_) => NativeKind::Boolean,
            Self::Date(_) => NativeKind::Date,
        }
    }

    /// Detect the kind of `input`: number (including `NaN` and `Infinity`),
    /// then boolean, then RFC 3339 or `YYYY-MM-DD` date, else string.
    pub fn parse(input: &str) -> Self {
        [NativeKind::Number, NativeKind::Boolean, NativeKind::Date]
            .into_iter()
            .find_map(|kind| Self::parse_as(kind, input).ok())
            .unwrap_or_else(|| Self::String(input.to_owned()))
    }

    /// Parse `input` as a value of the given kind.
    pub fn parse_as(kind: NativeKind, input: &str) -> Result<Self, ValueError> {
        let trimmed = input.trim();
        let invalid = || ValueError::Parse {
            kind,
            input: input.to_owned(),
        };
        match kind {
            NativeKind::String => Ok(Self::String(input.to_owned())),
            NativeKind::Number => parse_number(trimmed).map(Self::Number).ok_or_else(invalid),
            NativeKind::Boolean => trimmed
                .parse::<bool>()
                .map(Self::Boolean)
                .map_err(|_| invalid()),
            NativeKind::Date => parse_date(trimmed).map(Self::Date).ok_or_else(invalid),
        }
    }

    /// Equality of the underlying primitives. A date's primitive is its
    /// epoch milliseconds, so it equals the number holding them; strings and
    /// booleans never equal a value of another kind.
    pub fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Date(d), Self::Number(n)) | (Self::Number(n), Self::Date(d)) => {
                compare_f64(d.timestamp_millis() as f64, *n).is_eq()
            }
            _ => self.same_kind_eq(other),
        }
    }

    fn same_kind_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => compare_f64(*a, *b).is_eq(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a.timestamp_millis() == b.timestamp_millis(),
            _ => false,
        }
    }
}

fn parse_number(s: &str) -> Option<f64> {
    match s {
        "NaN" => Some(f64::NAN),
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => s.parse::<f64>().ok(),
    }
}

fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl Comparable for NativeValue {
    /// `None` across kinds; natural order within one.
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.compare_to(b),
            (Self::String(a), Self::String(b)) => a.compare_to(b),
            (Self::Boolean(a), Self::Boolean(b)) => a.compare_to(b),
            (Self::Date(a), Self::Date(b)) => a.compare_to(b),
            _ => None,
        }
    }

    fn inspect(&self) -> String {
        match self {
            Self::Number(n) => n.inspect(),
            Self::String(s) => inspect_str(s),
            Self::Boolean(b) => b.to_string(),
            Self::Date(d) => d.inspect(),
        }
    }

    fn equals(&self, other: &Self) -> bool {
        NativeValue::equals(self, other)
    }
}

/// Kind-fenced, so `==` agrees with `partial_cmp`.
impl PartialEq for NativeValue {
    fn eq(&self, other: &Self) -> bool {
        self.same_kind_eq(other)
    }
}

impl PartialOrd for NativeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare_to(other)
    }
}

/// Plain rendering, without the quotes `inspect` adds to strings.
impl fmt::Display for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            other => f.write_str(&other.inspect()),
        }
    }
}

impl FromStr for NativeValue {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<f64> for NativeValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for NativeValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for NativeValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<&str> for NativeValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for NativeValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for NativeValue {
    fn from(d: DateTime<Tz>) -> Self {
        Self::Date(d.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    const NAN: f64 = f64::NAN;
    const INF: f64 = f64::INFINITY;

    #[test]
    fn infinities_order_against_each_other_and_finites() {
        assert_eq!((-INF).compare_to(&INF), Some(Ordering::Less));
        assert_eq!(INF.compare_to(&f64::MAX), Some(Ordering::Greater));
        assert_eq!((-INF).compare_to(&f64::MIN), Some(Ordering::Less));
        assert!(INF.equals(&INF));
    }

    #[test]
    fn nan_equals_nan() {
        assert_eq!(NAN.compare_to(&NAN), Some(Ordering::Equal));
        assert!(NAN.equals(&f64::NAN));
    }

    #[test]
    fn nan_is_greater_than_everything_else() {
        for other in [INF, -INF, 0.0, -1.5, f64::MAX] {
            assert!(NAN.is_greater_than(&other).unwrap(), "NaN vs {other}");
            assert!(other.is_lower_than(&NAN).unwrap(), "{other} vs NaN");
        }
    }

    #[test]
    fn negative_zero_equals_zero() {
        assert!((-0.0f64).equals(&0.0));
    }

    #[test]
    fn integers_and_strings_use_natural_order() {
        assert!(3i64.is_lower_than(&4).unwrap());
        assert!("abc".is_lower_than("abd").unwrap());
        assert!(String::from("b").is_greater_than(&String::from("a")).unwrap());
        assert!(5u8.is_between(&5, &5).unwrap());
        assert!(true.is_greater_than(&false).unwrap());
    }

    #[test]
    fn dates_compare_by_instant_across_offsets() {
        let utc = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let same_instant = utc.with_timezone(&plus_two).with_timezone(&Utc);
        assert!(utc.equals(&same_instant));

        let later = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 1).unwrap();
        assert!(utc.is_lower_than(&later).unwrap());
    }

    #[test]
    fn native_values_fence_by_kind() {
        let n = NativeValue::Number(5.0);
        let s = NativeValue::from("5");
        assert_eq!(n.compare_to(&s), None);
        let err = n.is_lower_than(&s).unwrap_err();
        assert_eq!(err.to_string(), "Comparison of 5 with '5' failed");
        assert!(!n.equals(&s));
    }

    #[test]
    fn date_equals_its_epoch_number() {
        let date = NativeValue::from(Utc.timestamp_millis_opt(1_000).unwrap());
        let millis = NativeValue::Number(1_000.0);
        assert!(date.equals(&millis));
        assert!(millis.equals(&date));
        assert!(Comparable::equals(&date, &millis));
        assert!(!date.equals(&NativeValue::Number(1_001.0)));

        // still not ordered against each other, and not `==`
        assert_eq!(date.compare_to(&millis), None);
        assert!(date.is_lower_than_or_equal_to(&millis).is_err());
        assert_ne!(date, millis);
    }

    #[test]
    fn strings_and_booleans_never_equal_numbers() {
        assert!(!NativeValue::from("1").equals(&NativeValue::Number(1.0)));
        assert!(!NativeValue::Boolean(true).equals(&NativeValue::Number(1.0)));
    }

    #[test]
    fn native_value_equality_is_by_value() {
        assert_eq!(NativeValue::from("x"), NativeValue::from(String::from("x")));
        assert_eq!(NativeValue::Number(NAN), NativeValue::Number(NAN));
        assert!(NativeValue::Number(1.0) < NativeValue::Number(NAN));
    }

    #[test]
    fn parse_detects_kinds() {
        assert_eq!(NativeValue::parse("42").kind(), NativeKind::Number);
        assert_eq!(NativeValue::parse("-Infinity"), NativeValue::Number(-INF));
        assert!(matches!(NativeValue::parse("NaN"), NativeValue::Number(n) if n.is_nan()));
        assert_eq!(NativeValue::parse("true"), NativeValue::Boolean(true));
        assert_eq!(NativeValue::parse("2024-01-02").kind(), NativeKind::Date);
        assert_eq!(
            NativeValue::parse("2024-01-02T03:04:05+01:00").kind(),
            NativeKind::Date
        );
        assert_eq!(NativeValue::parse("hello"), NativeValue::from("hello"));
    }

    #[test]
    fn parse_as_forces_kind() {
        assert_eq!(
            NativeValue::parse_as(NativeKind::String, "42").unwrap(),
            NativeValue::from("42")
        );
        assert!(matches!(
            NativeValue::parse_as(NativeKind::Number, "forty-two"),
            Err(ValueError::Parse {
                kind: NativeKind::Number,
                ..
            })
        ));
    }

    #[test]
    fn kind_parses_aliases() {
        assert_eq!("bool".parse::<NativeKind>().unwrap(), NativeKind::Boolean);
        assert_eq!("Number".parse::<NativeKind>().unwrap(), NativeKind::Number);
        assert!("tuple".parse::<NativeKind>().is_err());
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(3.28), "3.28");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(NAN), "NaN");
        assert_eq!(format_number(-INF), "-Infinity");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-8), "1.5e-8");
    }

    #[test]
    fn inspect_renderings() {
        assert_eq!(NativeValue::from("it's").inspect(), r"'it\'s'");
        assert_eq!(NativeValue::Boolean(false).inspect(), "false");
        assert_eq!(
            NativeValue::from(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()).inspect(),
            "2024-01-02T03:04:05.000Z"
        );
        assert_eq!(NativeValue::from("plain").to_string(), "plain");
    }

    #[test]
    fn serde_round_trip_keeps_kind() {
        let json = serde_json::to_string(&NativeValue::Boolean(true)).unwrap();
        assert_eq!(json, r#"{"kind":"boolean","value":true}"#);
    }
}
