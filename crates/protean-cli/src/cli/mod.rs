//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use protean_core::native::NativeKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "protean",
    bin_name = "protean",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Render string templates and compare native values",
    long_about = "Protean renders #{placeholder} templates against JSON data \
                  and compares numbers, strings, booleans and dates with a \
                  total order (NaN sorts last).",
    after_help = "EXAMPLES:\n\
        \x20 protean render 'Hello #{user.name}' --json '{\"user\":{\"name\":\"Ann\"}}'\n\
        \x20 protean render --file motd.tpl --data facts.json\n\
        \x20 protean compare 3 NaN\n\
        \x20 protean sort 3 -Infinity NaN 1.5\n\
        \x20 protean completions bash > /usr/share/bash-completion/completions/protean",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate a template against JSON data.
    #[command(
        visible_alias = "r",
        about = "Render a template",
        after_help = "EXAMPLES:\n\
            \x20 protean render '#{a.b[0]}' --json '{\"a\":{\"b\":[42]}}'\n\
            \x20 echo '{\"lang\":\"Ruby\"}' | protean render 'in #{lang}' --data -\n\
            \x20 protean render '<%= name %>' --pattern '\\\\?<%=\\s*(\\w+)\\s*%>' --json '{\"name\":\"x\"}'"
    )]
    Render(RenderArgs),

    /// Compare two values and print every relation between them.
    #[command(
        visible_alias = "cmp",
        about = "Compare two values",
        after_help = "EXAMPLES:\n\
            \x20 protean compare 3 7\n\
            \x20 protean compare 2024-01-01 2023-12-31T23:00:00-02:00\n\
            \x20 protean compare 5 5 --as string"
    )]
    Compare(CompareArgs),

    /// Inclusive range test.
    #[command(
        about = "Check whether a value lies between two bounds",
        after_help = "EXAMPLES:\n\
            \x20 protean between 5 1 10\n\
            \x20 protean between m a z"
    )]
    Between(BetweenArgs),

    /// Sort values in their natural order.
    #[command(
        about = "Sort values",
        after_help = "EXAMPLES:\n\
            \x20 protean sort 3 NaN -Infinity 1.5\n\
            \x20 protean sort --reverse pear apple fig"
    )]
    Sort(SortArgs),

    /// Initialise a Protean configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 protean init\n\
            \x20 protean init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 protean completions bash > ~/.local/share/bash-completion/completions/protean\n\
            \x20 protean completions zsh  > ~/.zfunc/_protean\n\
            \x20 protean completions fish > ~/.config/fish/completions/protean.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Protean configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 protean config get template.pattern\n\
            \x20 protean config list\n\
            \x20 protean config path"
    )]
    Config(ConfigCommands),
}

// ── render ────────────────────────────────────────────────────────────────────

/// Arguments for `protean render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template text.
    #[arg(
        value_name = "TEMPLATE",
        required_unless_present = "file",
        conflicts_with = "file",
        help = "Template text"
    )]
    pub template: Option<String>,

    /// Read the template from a file.
    #[arg(
        short = 'f',
        long = "file",
        value_name = "PATH",
        help = "Read the template from a file"
    )]
    pub file: Option<PathBuf>,

    /// JSON data file, or `-` for stdin.
    #[arg(
        short = 'd',
        long = "data",
        value_name = "FILE",
        conflicts_with = "json",
        help = "JSON data file ('-' reads stdin)"
    )]
    pub data: Option<PathBuf>,

    /// Inline JSON data.
    #[arg(
        short = 'j',
        long = "json",
        value_name = "JSON",
        help = "Inline JSON data"
    )]
    pub json: Option<String>,

    /// Custom placeholder syntax.
    #[arg(
        short = 'p',
        long = "pattern",
        value_name = "REGEX",
        conflicts_with = "legacy_pattern",
        help = "Placeholder regex with one capture group"
    )]
    pub pattern: Option<String>,

    /// Placeholder syntax written in the old preceding-character style.
    #[arg(
        long = "legacy-pattern",
        value_name = "REGEX",
        help = "Old-style placeholder regex, rewritten before use"
    )]
    pub legacy_pattern: Option<String>,
}

// ── compare / between / sort ──────────────────────────────────────────────────

/// Arguments for `protean compare`.
#[derive(Debug, Args)]
pub struct CompareArgs {
    #[arg(value_name = "LEFT", allow_hyphen_values = true)]
    pub left: String,

    #[arg(value_name = "RIGHT", allow_hyphen_values = true)]
    pub right: String,

    /// Force the kind of both values instead of detecting it.
    #[arg(long = "as", value_name = "KIND", value_enum, help = "Kind of the values")]
    pub kind: Option<ValueKind>,
}

/// Arguments for `protean between`.
#[derive(Debug, Args)]
pub struct BetweenArgs {
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,

    #[arg(value_name = "MIN", allow_hyphen_values = true)]
    pub min: String,

    #[arg(value_name = "MAX", allow_hyphen_values = true)]
    pub max: String,

    #[arg(long = "as", value_name = "KIND", value_enum, help = "Kind of the values")]
    pub kind: Option<ValueKind>,
}

/// Arguments for `protean sort`.
#[derive(Debug, Args)]
pub struct SortArgs {
    #[arg(
        value_name = "VALUES",
        required = true,
        num_args = 1..,
        allow_hyphen_values = true
    )]
    pub values: Vec<String>,

    #[arg(long = "as", value_name = "KIND", value_enum, help = "Kind of the values")]
    pub kind: Option<ValueKind>,

    /// Largest first. Flags go before the values.
    #[arg(short = 'r', long = "reverse", help = "Sort in descending order")]
    pub reverse: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `protean init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `protean completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `protean config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `template.pattern`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Kinds a value argument can be read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ValueKind {
    #[value(alias = "num")]
    Number,
    #[value(alias = "str")]
    String,
    #[value(alias = "bool")]
    Boolean,
    Date,
}

impl From<ValueKind> for NativeKind {
    fn from(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Number => Self::Number,
            ValueKind::String => Self::String,
            ValueKind::Boolean => Self::Boolean,
            ValueKind::Date => Self::Date,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
