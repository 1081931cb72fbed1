//! The template itself.

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use regex::Captures;
use serde_json::Value;
use tracing::{instrument, trace};

use super::context::{ToTemplateReplacements, interpret};
use super::path::PlaceholderPath;
use super::pattern::Pattern;

/// A reusable string template.
///
/// Placeholders (`#{expression}` by default) are replaced by the value found
/// at `expression` in the evaluation context. Prefix a placeholder with a
/// backslash to emit it literally.
///
/// Evaluation borrows the template immutably, so one template can serve any
/// number of evaluations, from any number of threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    pattern: Pattern,
}

impl Template {
    /// Create a template using the default `#{...}` syntax.
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_pattern(source, Pattern::default())
    }

    /// Create a template using a custom placeholder syntax.
    pub fn with_pattern(source: impl Into<String>, pattern: Pattern) -> Self {
        Self {
            source: source.into(),
            pattern,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Substitute every placeholder with data from `object`.
    ///
    /// Missing data never fails: an absent context, a path that leads
    /// nowhere, or a path naming the context itself all produce an empty
    /// string.
    #[instrument(level = "trace", skip_all, fields(len = self.source.len()))]
    pub fn evaluate<T>(&self, object: &T) -> String
    where
        T: ToTemplateReplacements + ?Sized,
    {
        let context = object.to_template_replacements();
        let root: &Value = &context;

        let mut placeholders = 0usize;
        let rendered = self
            .pattern
            .regex()
            .replace_all(&self.source, |caps: &Captures<'_>| {
                placeholders += 1;
                substitute(caps, root)
            });

        trace!(placeholders, "template evaluated");
        rendered.into_owned()
    }
}

fn substitute(caps: &Captures<'_>, root: &Value) -> String {
    let interpolation = caps.get(0).map_or("", |m| m.as_str());
    if let Some(literal) = interpolation.strip_prefix('\\') {
        return literal.to_owned();
    }
    if root.is_null() {
        return String::new();
    }

    let expr = caps.get(1).map_or("", |m| m.as_str());
    match PlaceholderPath::parse(expr).resolve(root) {
        Some(Cow::Borrowed(value)) if std::ptr::eq(value, root) => String::new(),
        Some(value) => interpret(&value),
        None => String::new(),
    }
}

/// Evaluate `source` once with the default syntax.
pub fn interpolate<T>(source: &str, object: &T) -> String
where
    T: ToTemplateReplacements + ?Sized,
{
    Template::new(source).evaluate(object)
}

impl FromStr for Template {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn substitutes_top_level_field() {
        assert_eq!(Template::new("#{a}").evaluate(&json!({"a": "x"})), "x");
    }

    #[test]
    fn escaped_placeholder_is_literal() {
        assert_eq!(Template::new(r"\#{a}").evaluate(&json!({"a": "x"})), "#{a}");
    }

    #[test]
    fn escape_applies_even_without_context() {
        assert_eq!(Template::new(r"\#{a}").evaluate(&Value::Null), "#{a}");
    }

    #[test]
    fn null_and_empty_contexts_render_empty() {
        let t = Template::new("#{a}");
        assert_eq!(t.evaluate(&Value::Null), "");
        assert_eq!(t.evaluate(&json!({})), "");
        assert_eq!(t.evaluate(&None::<Value>), "");
    }

    #[test]
    fn nested_path() {
        assert_eq!(
            Template::new("#{a.b}").evaluate(&json!({"a": {"b": 5}})),
            "5"
        );
    }

    #[test]
    fn root_reference_renders_empty() {
        let data = json!({"a": 1});
        assert_eq!(Template::new("[#{}]").evaluate(&data), "[]");
        assert_eq!(Template::new("[#{.}]").evaluate(&data), "[]");
    }

    #[test]
    fn single_pass_does_not_rescan_replacements() {
        let data = json!({"a": "#{b}", "b": "nope"});
        assert_eq!(Template::new("#{a}").evaluate(&data), "#{b}");
    }

    #[test]
    fn leaves_surrounding_text_alone() {
        let t = Template::new("The TV show #{title} was created by #{author}.");
        let show = json!({"title": "The Simpsons", "author": "Matt Groening", "network": "FOX"});
        assert_eq!(
            t.evaluate(&show),
            "The TV show The Simpsons was created by Matt Groening."
        );
    }

    #[test]
    fn reuse_does_not_leak_between_evaluations() {
        let t = Template::new("Multiply by #{factor} to convert from #{from} to #{to}.");
        let first = json!({"from": "meters", "to": "feet", "factor": 3.28});
        let second = json!({"from": "kilojoules", "to": "BTUs"});
        assert_eq!(
            t.evaluate(&first),
            "Multiply by 3.28 to convert from meters to feet."
        );
        assert_eq!(
            t.evaluate(&second),
            "Multiply by  to convert from kilojoules to BTUs."
        );
        assert_eq!(
            t.source(),
            "Multiply by #{factor} to convert from #{from} to #{to}."
        );
    }

    #[test]
    fn custom_pattern() {
        let syntax = Pattern::new(r"\\?<%=\s*(\w+)\s*%>").unwrap();
        let t = Template::with_pattern("<b><%= name %></b>, <b><%=age%></b>", syntax);
        assert_eq!(
            t.evaluate(&json!({"name": "John Smith", "age": 26})),
            "<b>John Smith</b>, <b>26</b>"
        );
    }

    #[test]
    fn legacy_pattern_behaves_like_modern() {
        let syntax = Pattern::legacy(r"(^|.|\r|\n)(<%=\s*(\w+)\s*%>)").unwrap();
        let t = Template::with_pattern(r"<%= name %> \<%= name %>", syntax);
        assert_eq!(t.evaluate(&json!({"name": "Ann"})), "Ann <%= name %>");
    }

    #[test]
    fn array_context_by_index() {
        assert_eq!(
            interpolate("#{0} with #{1}", &json!(["5", "'five'"])),
            "5 with 'five'"
        );
    }

    #[test]
    fn conversion_hook_replaces_context() {
        struct Account {
            owner: String,
            password: String,
        }

        impl ToTemplateReplacements for Account {
            fn to_template_replacements(&self) -> Cow<'_, Value> {
                Cow::Owned(json!({"owner": self.owner}))
            }
        }

        let account = Account {
            owner: "ann".into(),
            password: "hunter2".into(),
        };
        assert_eq!(
            Template::new("#{owner}:#{password}").evaluate(&account),
            "ann:"
        );
        assert_eq!(account.password, "hunter2");
    }

    #[test]
    fn template_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Template>();

        let t = std::sync::Arc::new(Template::new("#{n}"));
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let t = std::sync::Arc::clone(&t);
                std::thread::spawn(move || t.evaluate(&json!({ "n": n })))
            })
            .collect();
        let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, ["0", "1", "2", "3"]);
    }

    #[test]
    fn from_str_and_display() {
        let t: Template = "hi #{name}".parse().unwrap();
        assert_eq!(t.to_string(), "hi #{name}");
    }
}
