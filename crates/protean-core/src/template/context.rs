//! What a template is evaluated against.
//!
//! Templates resolve placeholders over a [`serde_json::Value`]. A type
//! chooses which fields it exposes by implementing
//! [`ToTemplateReplacements`]; JSON values expose themselves.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::native::format_number;

/// Conversion into the value placeholders are resolved against.
///
/// ```
/// use std::borrow::Cow;
/// use protean_core::template::{Template, ToTemplateReplacements};
/// use serde_json::{json, Value};
///
/// struct Show { title: String, secret: String }
///
/// impl ToTemplateReplacements for Show {
///     fn to_template_replacements(&self) -> Cow<'_, Value> {
///         Cow::Owned(json!({ "title": self.title }))
///     }
/// }
///
/// let show = Show { title: "The Simpsons".into(), secret: "x".into() };
/// let t = Template::new("#{title}/#{secret}");
/// assert_eq!(t.evaluate(&show), "The Simpsons/");
/// ```
pub trait ToTemplateReplacements {
    fn to_template_replacements(&self) -> Cow<'_, Value>;
}

impl ToTemplateReplacements for Value {
    fn to_template_replacements(&self) -> Cow<'_, Value> {
        Cow::Borrowed(self)
    }
}

impl ToTemplateReplacements for Map<String, Value> {
    fn to_template_replacements(&self) -> Cow<'_, Value> {
        Cow::Owned(Value::Object(self.clone()))
    }
}

impl<V: Serialize> ToTemplateReplacements for BTreeMap<String, V> {
    fn to_template_replacements(&self) -> Cow<'_, Value> {
        Cow::Owned(replacements_from_serialize(self))
    }
}

impl<V: Serialize, S: BuildHasher> ToTemplateReplacements for HashMap<String, V, S> {
    fn to_template_replacements(&self) -> Cow<'_, Value> {
        Cow::Owned(replacements_from_serialize(self))
    }
}

/// `None` is the absent context: every placeholder becomes empty.
impl<T: ToTemplateReplacements> ToTemplateReplacements for Option<T> {
    fn to_template_replacements(&self) -> Cow<'_, Value> {
        match self {
            Some(inner) => inner.to_template_replacements(),
            None => Cow::Owned(Value::Null),
        }
    }
}

impl<T: ToTemplateReplacements + ?Sized> ToTemplateReplacements for &T {
    fn to_template_replacements(&self) -> Cow<'_, Value> {
        (**self).to_template_replacements()
    }
}

/// Convert any serialisable value into a replacement context.
///
/// Serialisation failures (non-string map keys, failing `Serialize` impls)
/// yield `null`, so the template renders with empty placeholders.
pub fn replacements_from_serialize<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|err| {
        debug!(error = %err, "value could not be used as template context");
        Value::Null
    })
}

/// String form of a resolved value.
pub fn interpret(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(u)) => u.to_string(),
            (None, None) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(interpret).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn interpret_scalars() {
        assert_eq!(interpret(&Value::Null), "");
        assert_eq!(interpret(&json!(true)), "true");
        assert_eq!(interpret(&json!(5)), "5");
        assert_eq!(interpret(&json!(5.0)), "5");
        assert_eq!(interpret(&json!(0.9478)), "0.9478");
        assert_eq!(interpret(&json!(-3)), "-3");
        assert_eq!(interpret(&json!("text")), "text");
    }

    #[test]
    fn interpret_collections() {
        assert_eq!(interpret(&json!([1, null, "a", [2, 3]])), "1,,a,2,3");
        assert_eq!(interpret(&json!({"a": 1})), "[object Object]");
    }

    #[test]
    fn option_none_is_null() {
        let none: Option<Value> = None;
        assert_eq!(*none.to_template_replacements(), Value::Null);
    }

    #[test]
    fn maps_serialise_into_objects() {
        let mut map = BTreeMap::new();
        map.insert("k".to_string(), 1);
        assert_eq!(*map.to_template_replacements(), json!({"k": 1}));
    }

    #[test]
    fn serialize_structs() {
        #[derive(Serialize)]
        struct Conversion {
            from: &'static str,
            factor: f64,
        }

        let value = replacements_from_serialize(&Conversion {
            from: "meters",
            factor: 3.28,
        });
        assert_eq!(value, json!({"from": "meters", "factor": 3.28}));
    }
}
