//! `protean between`: inclusive range check.

use serde_json::json;
use tracing::instrument;

use protean_core::comparable::Comparable;

use crate::{
    cli::BetweenArgs,
    commands::parse_value,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: BetweenArgs, output: OutputManager) -> CliResult<()> {
    let value = parse_value(&args.value, args.kind)?;
    let min = parse_value(&args.min, args.kind)?;
    let max = parse_value(&args.max, args.kind)?;

    let inside = value.is_between(&min, &max)?;

    if output.is_json() {
        output.json(&json!({
            "value": value.inspect(),
            "min": min.inspect(),
            "max": max.inspect(),
            "between": inside,
        }))?;
        return Ok(());
    }

    let range = format!("[{}, {}]", min.inspect(), max.inspect());
    if inside {
        output.success(&format!("{} is within {range}", value.inspect()))?;
    } else {
        output.error(&format!("{} is outside {range}", value.inspect()))?;
    }
    Ok(())
}
