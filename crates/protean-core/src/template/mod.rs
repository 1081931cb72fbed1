//! String templates with `#{path}` placeholders.
//!
//! ```
//! use protean_core::template::Template;
//! use serde_json::json;
//!
//! let t = Template::new("in #{lang} we also use the \\#{variable} syntax");
//! let data = json!({ "lang": "Ruby", "variable": "(not used)" });
//! assert_eq!(t.evaluate(&data), "in Ruby we also use the #{variable} syntax");
//! ```

mod context;
mod engine;
mod path;
mod pattern;

pub use context::{ToTemplateReplacements, interpret, replacements_from_serialize};
pub use engine::{Template, interpolate};
pub use path::{PlaceholderPath, Segment};
pub use pattern::{DEFAULT_PATTERN, Pattern, is_legacy, rewrite_legacy};
