//! `protean sort`: sort values in their natural order.

use serde_json::{Value, json};
use tracing::{debug, instrument};

use protean_core::comparable::sort_comparable;
use protean_core::native::NativeValue;

use crate::{
    cli::SortArgs,
    commands::parse_value,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(count = args.values.len()))]
pub fn execute(args: SortArgs, output: OutputManager) -> CliResult<()> {
    let sorted = sorted_values(&args)?;
    debug!(count = sorted.len(), "values sorted");

    if output.is_json() {
        output.json(&rendered(&sorted))?;
        return Ok(());
    }

    for value in &sorted {
        output.emit(&value.to_string())?;
    }
    Ok(())
}

fn sorted_values(args: &SortArgs) -> CliResult<Vec<NativeValue>> {
    let mut values = args
        .values
        .iter()
        .map(|raw| parse_value(raw, args.kind))
        .collect::<CliResult<Vec<_>>>()?;

    sort_comparable(&mut values)?;
    if args.reverse {
        values.reverse();
    }
    Ok(values)
}

/// JSON numbers have no NaN or infinities, so values go out in their
/// printed form, tagged with their kind.
fn rendered(values: &[NativeValue]) -> Vec<Value> {
    values
        .iter()
        .map(|v| json!({ "kind": v.kind().as_str(), "value": v.to_string() }))
        .collect()
}
