//! Tracing subscriber initialisation.
//!
//! `protean-core` only emits events (comparison failures at DEBUG, pattern
//! compilation and template evaluation at TRACE); this module decides which
//! of them reach stderr.  The binary and the core library get separate
//! levels so that `-vv` shows why a comparison failed without the CLI's own
//! debug chatter.
//!
//! | Flag(s)   | `protean` | `protean_core` |
//! |-----------|-----------|----------------|
//! | `--quiet` | ERROR     | ERROR          |
//! | (none)    | WARN      | WARN           |
//! | `-v`      | INFO      | WARN           |
//! | `-vv`     | INFO      | DEBUG          |
//! | `-vvv`    | TRACE     | TRACE          |
//!
//! `RUST_LOG` replaces the table entirely when set.

use std::io::IsTerminal as _;

use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Per-crate filter levels derived from the verbosity flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LogLevels {
    cli: Level,
    core: Level,
}

impl LogLevels {
    fn from_args(args: &GlobalArgs) -> Self {
        let (cli, core) = if args.quiet {
            (Level::ERROR, Level::ERROR)
        } else {
            match args.verbose {
                0 => (Level::WARN, Level::WARN),
                1 => (Level::INFO, Level::WARN),
                2 => (Level::INFO, Level::DEBUG),
                _ => (Level::TRACE, Level::TRACE),
            }
        };
        Self { cli, core }
    }

    fn directives(self) -> String {
        let cli = self.cli.as_str().to_ascii_lowercase();
        let core = self.core.as_str().to_ascii_lowercase();
        format!("protean={cli},protean_core={core}")
    }
}

/// Install the global subscriber.  Call once, before any event fires.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(LogLevels::from_args(args).directives()));

    // Events from core are the interesting part at -vv; keep their target.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(args.verbose >= 2)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}
