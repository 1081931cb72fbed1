//! `protean render`: evaluate a template against JSON data.

use std::fs;
use std::io;
use std::path::Path;

use serde_json::{Value, json};
use tracing::{debug, instrument};

use protean_core::template::{Pattern, Template};

use crate::{
    cli::RenderArgs,
    config::{AppConfig, TemplateConfig},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Render the template and print the result.
#[instrument(skip_all)]
pub fn execute(args: RenderArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let source = read_template(&args)?;
    let pattern = resolve_pattern(&args, &config.template)?;
    let data = read_data(&args)?;

    debug!(pattern = %pattern, "rendering template");
    let rendered = Template::with_pattern(source, pattern).evaluate(&data);

    if output.is_json() {
        output.json(&json!({ "rendered": rendered }))?;
    } else {
        output.emit(&rendered)?;
    }
    Ok(())
}

fn read_template(args: &RenderArgs) -> CliResult<String> {
    match (&args.template, &args.file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => read_file(path, "template"),
        (None, None) => Err(CliError::InvalidInput {
            message: "a template or --file is required".into(),
            source: None,
        }),
    }
}

/// `--legacy-pattern`, then `--pattern`, then the configured pattern, then
/// the built-in `#{...}` syntax.
fn resolve_pattern(args: &RenderArgs, config: &TemplateConfig) -> CliResult<Pattern> {
    let pattern = if let Some(legacy) = &args.legacy_pattern {
        Pattern::legacy(legacy)?
    } else if let Some(source) = &args.pattern {
        Pattern::parse(source)?
    } else if let Some(source) = &config.pattern {
        if config.legacy {
            Pattern::legacy(source)?
        } else {
            Pattern::parse(source)?
        }
    } else {
        Pattern::default()
    };
    Ok(pattern)
}

/// Data from `--data` (a file, or stdin for `-`) or `--json`.  Without
/// either, every placeholder renders empty.
fn read_data(args: &RenderArgs) -> CliResult<Value> {
    if let Some(path) = &args.data {
        if path.as_os_str() == "-" {
            return serde_json::from_reader(io::stdin().lock()).map_err(|source| {
                CliError::InvalidData {
                    origin: "stdin".into(),
                    source,
                }
            });
        }
        let text = read_file(path, "data")?;
        return parse_json(&text, &path.display().to_string());
    }
    match &args.json {
        Some(text) => parse_json(text, "--json"),
        None => Ok(Value::Null),
    }
}

fn parse_json(text: &str, origin: &str) -> CliResult<Value> {
    serde_json::from_str(text).map_err(|source| CliError::InvalidData {
        origin: origin.to_owned(),
        source,
    })
}

fn read_file(path: &Path, what: &str) -> CliResult<String> {
    if !path.exists() {
        return Err(CliError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path)
        .with_cli_context(|| format!("Failed to read {what} file '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn args(template: &str) -> RenderArgs {
        RenderArgs {
            template: Some(template.into()),
            file: None,
            data: None,
            json: None,
            pattern: None,
            legacy_pattern: None,
        }
    }

    #[test]
    fn default_pattern_without_overrides() {
        let pattern = resolve_pattern(&args("x"), &TemplateConfig::default()).unwrap();
        assert_eq!(pattern, Pattern::default());
    }

    #[test]
    fn flag_pattern_beats_config() {
        let mut a = args("x");
        a.pattern = Some(r"\\?\$\{(\w+)\}".into());
        let config = TemplateConfig {
            pattern: Some(r"\\?%\{(\w+)\}".into()),
            legacy: false,
        };
        let pattern = resolve_pattern(&a, &config).unwrap();
        assert_eq!(pattern.as_str(), r"\\?\$\{(\w+)\}");
    }

    #[test]
    fn config_legacy_pattern_is_rewritten() {
        let config = TemplateConfig {
            pattern: Some(r"(^|.|\r|\n)(\{\{\s*(\w+)\s*\}\})".into()),
            legacy: true,
        };
        let pattern = resolve_pattern(&args("x"), &config).unwrap();
        let rendered = Template::with_pattern("hi {{ who }}", pattern)
            .evaluate(&json!({ "who": "there" }));
        assert_eq!(rendered, "hi there");
    }

    #[test]
    fn bad_pattern_is_user_error() {
        let mut a = args("x");
        a.pattern = Some("(".into());
        let err = resolve_pattern(&a, &TemplateConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn no_data_is_null() {
        assert_eq!(read_data(&args("x")).unwrap(), Value::Null);
    }

    #[test]
    fn inline_json_is_parsed() {
        let mut a = args("x");
        a.json = Some(r#"{"a":[1,2]}"#.into());
        assert_eq!(read_data(&a).unwrap(), json!({ "a": [1, 2] }));
    }

    #[test]
    fn invalid_json_names_origin() {
        let mut a = args("x");
        a.json = Some("{nope".into());
        match read_data(&a) {
            Err(CliError::InvalidData { origin, .. }) => assert_eq!(origin, "--json"),
            other => panic!("expected InvalidData, got {other:?}"),
        }
    }

    #[test]
    fn data_file_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name":"Ann"}}"#).unwrap();
        let mut a = args("x");
        a.data = Some(file.path().to_path_buf());
        assert_eq!(read_data(&a).unwrap(), json!({ "name": "Ann" }));
    }

    #[test]
    fn missing_template_file_is_not_found() {
        let mut a = args("x");
        a.template = None;
        a.file = Some(PathBuf::from("/definitely/not/here.tpl"));
        let err = read_template(&a).unwrap_err();
        assert!(matches!(err, CliError::InputNotFound { .. }));
        assert_eq!(err.exit_code(), 3);
    }
}
