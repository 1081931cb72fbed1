//! `protean compare`: order two values and report every relation.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::instrument;

use protean_core::comparable::{Comparable, compare};
use protean_core::native::NativeValue;

use crate::{
    cli::CompareArgs,
    commands::parse_value,
    error::CliResult,
    output::OutputManager,
};

/// Every relation between two comparable values.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct Relations {
    pub left: String,
    pub right: String,
    pub ordering: &'static str,
    pub equals: bool,
    pub lower_than: bool,
    pub greater_than: bool,
    pub lower_than_or_equal_to: bool,
    pub greater_than_or_equal_to: bool,
}

impl Relations {
    pub(crate) fn of(left: &NativeValue, right: &NativeValue) -> CliResult<Self> {
        let ordering = compare(left, right)?;
        Ok(Self {
            left: left.inspect(),
            right: right.inspect(),
            ordering: ordering_name(ordering),
            equals: left.equals(right),
            lower_than: left.is_lower_than(right)?,
            greater_than: left.is_greater_than(right)?,
            lower_than_or_equal_to: left.is_lower_than_or_equal_to(right)?,
            greater_than_or_equal_to: left.is_greater_than_or_equal_to(right)?,
        })
    }

    fn symbol(&self) -> &'static str {
        match self.ordering {
            "less" => "<",
            "greater" => ">",
            _ => "==",
        }
    }
}

fn ordering_name(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "less",
        Ordering::Equal => "equal",
        Ordering::Greater => "greater",
    }
}

#[instrument(skip_all)]
pub fn execute(args: CompareArgs, output: OutputManager) -> CliResult<()> {
    let left = parse_value(&args.left, args.kind)?;
    let right = parse_value(&args.right, args.kind)?;
    let relations = Relations::of(&left, &right)?;

    if output.is_json() {
        output.json(&relations)?;
        return Ok(());
    }

    output.emit(&format!(
        "{} {} {}",
        relations.left,
        relations.symbol(),
        relations.right
    ))?;
    for (name, holds) in [
        ("equals", relations.equals),
        ("lower than", relations.lower_than),
        ("greater than", relations.greater_than),
        ("lower than or equal to", relations.lower_than_or_equal_to),
        ("greater than or equal to", relations.greater_than_or_equal_to),
    ] {
        output.print(&format!("  {name:<26}{holds}"))?;
    }
    Ok(())
}
