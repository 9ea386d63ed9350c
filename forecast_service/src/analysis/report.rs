//! Runs the statistics engine over a parsed forecast.

use crate::analysis::extrema::aggregate_sparse;
use crate::analysis::periods::resolve_day_boundary;
use crate::analysis::wind_chill::wind_chill_series;
use crate::model::{ExtremaResult, ForecastError, ForecastSeries};

/// Everything the renderer needs besides the raw series.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReport {
    /// Index of the last slot of day 1.
    pub day_boundary: usize,
    pub temperature_stats: ExtremaResult,
    pub wind_chills: Vec<Option<f64>>,
    pub wind_chill_stats: ExtremaResult,
    /// Lowest of the feed's daily minimum temperatures for day 1.
    pub day1_low: Option<f64>,
    /// Highest of the feed's daily maximum temperatures for day 1.
    pub day1_high: Option<f64>,
}

/// Builds the report, failing only when day 1 and day 2 cannot be split.
pub fn build_report(series: &ForecastSeries) -> Result<ForecastReport, ForecastError> {
    let day_boundary = resolve_day_boundary(&series.hours)?;

    let temperature_stats = aggregate_sparse(&series.temperatures, &series.hours, day_boundary);

    let wind_chills = wind_chill_series(
        &series.temperatures,
        &series.wind_mins(),
        &series.wind_maxs(),
    );
    let wind_chill_stats = aggregate_sparse(&wind_chills, &series.hours, day_boundary);

    Ok(ForecastReport {
        day_boundary,
        temperature_stats,
        wind_chills,
        wind_chill_stats,
        day1_low: day_one_extreme(&series.min_temperatures, day_boundary, f64::min),
        day1_high: day_one_extreme(&series.max_temperatures, day_boundary, f64::max),
    })
}

/// Folds the present values among the first `day_boundary + 1` entries.
fn day_one_extreme(
    values: &[Option<f64>],
    day_boundary: usize,
    pick: fn(f64, f64) -> f64,
) -> Option<f64> {
    values
        .iter()
        .take(day_boundary + 1)
        .flatten()
        .copied()
        .reduce(pick)
}
