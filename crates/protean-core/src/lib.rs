//! Protean Core - comparable values and string templates.
//!
//! Two independent utilities:
//!
//! - [`comparable`]: implement one three-way [`Comparable::compare_to`] and
//!   get `equals`, `is_lower_than`, `is_greater_than`,
//!   `is_lower_than_or_equal_to`, `is_greater_than_or_equal_to` and
//!   `is_between` for free. [`native`] provides the implementations for
//!   numbers, strings, booleans and dates, plus the runtime-typed
//!   [`NativeValue`].
//! - [`template`]: reusable templates that substitute `#{a.b[0]}`
//!   placeholders with data from a JSON value.
//!
//! ## Usage
//!
//! ```rust
//! use protean_core::prelude::*;
//! use serde_json::json;
//!
//! assert!(f64::NAN.is_greater_than(&f64::INFINITY).unwrap());
//! assert!(NativeValue::from(1.0).is_lower_than(&NativeValue::from("1")).is_err());
//!
//! let t = Template::new("#{name} is #{age}");
//! assert_eq!(t.evaluate(&json!({"name": "Ann", "age": 31})), "Ann is 31");
//! ```

pub mod comparable;
pub mod error;
pub mod native;
pub mod template;

pub use comparable::Comparable;
pub use native::NativeValue;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::comparable::{Comparable, compare, sort_comparable};
    pub use crate::error::{ComparisonError, PatternError, ProteanError, ProteanResult};
    pub use crate::native::{NativeKind, NativeValue};
    pub use crate::template::{Pattern, Template, ToTemplateReplacements, interpolate};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
