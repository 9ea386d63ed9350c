//! Tie-aware extrema over a two-day series.
//!
//! Morning slots feed the day's minimum and daytime slots feed the day's
//! maximum; night slots are ignored. Every index that ties the extreme value
//! is kept so the renderer can highlight all of them.

use crate::analysis::periods::{classify_day, classify_period, resolve_day_boundary};
use crate::model::{Day, Extremum, ExtremaResult, ForecastError, Period};

/// Aggregates a fully populated series.
///
/// `values` and `hours` are parallel; `day_boundary` is the index of the last
/// slot of day 1 (see `periods::resolve_day_boundary`).
pub fn aggregate(values: &[f64], hours: &[u32], day_boundary: usize) -> ExtremaResult {
    fold(
        values.iter().copied().map(Some),
        hours,
        day_boundary,
    )
}

/// Aggregates a series with gaps. Absent samples are skipped the same way
/// night slots are.
pub fn aggregate_sparse(
    values: &[Option<f64>],
    hours: &[u32],
    day_boundary: usize,
) -> ExtremaResult {
    fold(values.iter().copied(), hours, day_boundary)
}

/// Resolves the day boundary from `hours`, then aggregates.
pub fn aggregate_series(
    values: &[Option<f64>],
    hours: &[u32],
) -> Result<ExtremaResult, ForecastError> {
    let day_boundary = resolve_day_boundary(hours)?;
    Ok(aggregate_sparse(values, hours, day_boundary))
}

fn fold<I>(values: I, hours: &[u32], day_boundary: usize) -> ExtremaResult
where
    I: Iterator<Item = Option<f64>>,
{
    let mut stats = ExtremaResult::default();

    for (index, (value, &hour)) in values.zip(hours).enumerate() {
        let Some(value) = value.filter(|v| !v.is_nan()) else {
            continue;
        };

        let day = classify_day(index, day_boundary);
        match classify_period(hour) {
            Period::Morning => {
                let slot = match day {
                    Day::One => &mut stats.day1_min,
                    Day::Two => &mut stats.day2_min,
                };
                offer(slot, value, index, |candidate, current| candidate < current);
            }
            Period::Daytime => {
                let slot = match day {
                    Day::One => &mut stats.day1_max,
                    Day::Two => &mut stats.day2_max,
                };
                offer(slot, value, index, |candidate, current| candidate > current);
            }
            Period::Night => {}
        }
    }

    stats
}

/// Replaces the extremum when `better` holds, appends on an exact tie.
fn offer(slot: &mut Extremum, value: f64, index: usize, better: impl Fn(f64, f64) -> bool) {
    match slot.value {
        Some(current) if value == current => slot.indexes.push(index),
        Some(current) if !better(value, current) => {}
        _ => {
            slot.value = Some(value);
            slot.indexes.clear();
            slot.indexes.push(index);
        }
    }
}
