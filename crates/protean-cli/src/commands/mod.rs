//! Command handlers, one module per subcommand.

pub mod between;
pub mod compare;
pub mod completions;
pub mod config;
pub mod init;
pub mod render;
pub mod sort;

use protean_core::native::NativeValue;

use crate::{cli::ValueKind, error::CliResult};

/// Read a command-line value, detecting its kind unless `--as` forced one.
pub(crate) fn parse_value(raw: &str, kind: Option<ValueKind>) -> CliResult<NativeValue> {
    match kind {
        Some(kind) => Ok(NativeValue::parse_as(kind.into(), raw)?),
        None => Ok(NativeValue::parse(raw)),
    }
}
