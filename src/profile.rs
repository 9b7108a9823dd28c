//! Battery charge/discharge profile extraction.
//!
//! Locates the header row of a cycler export, casts the voltage, current
//! and amp-hour series to numbers with Polars, and reduces the usable rows
//! to a single [`BatteryProfileSummary`]. The public entry point is total:
//! it yields exactly one summary or nothing.

use crate::constants::DEFAULT_HEADER_TOKENS;
use crate::error::Result;
use crate::header::{ProfileColumns, find_header_row};
use crate::models::{BatteryProfileSummary, Grid};
use polars::prelude::*;
use tracing::debug;

const TIME: &str = "time";
const VOLTAGE: &str = "voltage";
const CURRENT: &str = "current";
const AMP_HOURS: &str = "amp_hours";

/// Extract a battery profile using the default header tokens
pub fn extract_battery_profile(grid: &Grid) -> Option<BatteryProfileSummary> {
    let tokens: Vec<String> = DEFAULT_HEADER_TOKENS
        .iter()
        .map(|token| token.to_string())
        .collect();
    extract_battery_profile_with(grid, &tokens)
}

/// Extract a battery profile, detecting the header row by `header_tokens`.
///
/// Missing columns, failed casts and empty results all yield `None`.
pub fn extract_battery_profile_with(
    grid: &Grid,
    header_tokens: &[String],
) -> Option<BatteryProfileSummary> {
    let header = find_header_row(grid, header_tokens)?;
    let columns = header.profile_columns()?;
    let body = &grid[header.index + 1..];

    match summarize(body, columns) {
        Ok(summary) => summary,
        Err(e) => {
            debug!("Battery profile extraction failed: {}", e);
            None
        }
    }
}

/// Cell at `index`, trimmed; ragged rows yield `None`
fn cell(row: &[String], index: usize) -> Option<String> {
    row.get(index).map(|value| value.trim().to_string())
}

/// Build a string frame of the four profile series from the rows below the header
fn profile_frame(body: &[Vec<String>], columns: ProfileColumns) -> Result<DataFrame> {
    let series = |name: &str, index: usize| {
        let values: Vec<Option<String>> = body.iter().map(|row| cell(row, index)).collect();
        Column::new(name.into(), values)
    };

    let df = DataFrame::new(vec![
        series(TIME, columns.time),
        series(VOLTAGE, columns.voltage),
        series(CURRENT, columns.current),
        series(AMP_HOURS, columns.amp_hours),
    ])?;

    Ok(df)
}

/// Mask of cells that cast to a real number
fn usable_value(name: &str) -> Expr {
    col(name).is_not_null().and(col(name).is_not_nan())
}

fn summarize(
    body: &[Vec<String>],
    columns: ProfileColumns,
) -> Result<Option<BatteryProfileSummary>> {
    let raw = profile_frame(body, columns)?;
    let total_rows = raw.height();

    // Non-strict casts turn unparseable cells into nulls, but "NaN" parses
    // to a float NaN; either one drops the row
    let usable = raw
        .lazy()
        .with_columns([
            col(VOLTAGE).cast(DataType::Float64),
            col(CURRENT).cast(DataType::Float64),
            col(AMP_HOURS).cast(DataType::Float64),
        ])
        .filter(usable_value(VOLTAGE).and(usable_value(CURRENT)).and(usable_value(AMP_HOURS)))
        .collect()?;

    debug!(
        "Battery profile: {} of {} rows usable",
        usable.height(),
        total_rows
    );

    if usable.height() == 0 {
        return Ok(None);
    }

    let stats = usable
        .lazy()
        .select([
            col(TIME).last().alias("duration"),
            col(VOLTAGE).first().alias("start_voltage"),
            col(VOLTAGE).last().alias("end_voltage"),
            col(CURRENT).abs().max().alias("max_current"),
            col(AMP_HOURS).last().alias("total_capacity"),
        ])
        .collect()?;

    let float_stat = |name: &str| -> Result<Option<f64>> {
        Ok(stats.column(name)?.as_materialized_series().f64()?.get(0))
    };

    let duration = stats
        .column("duration")?
        .as_materialized_series()
        .str()?
        .get(0)
        .unwrap_or_default()
        .to_string();

    let summary = match (
        float_stat("start_voltage")?,
        float_stat("end_voltage")?,
        float_stat("max_current")?,
        float_stat("total_capacity")?,
    ) {
        (Some(start_voltage), Some(end_voltage), Some(max_current), Some(total_capacity)) => {
            Some(BatteryProfileSummary {
                duration,
                start_voltage,
                end_voltage,
                max_current,
                total_capacity,
            })
        }
        _ => None,
    };

    Ok(summary)
}
