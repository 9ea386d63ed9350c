//! Period and day classification for forecast slots.

use crate::model::{DAY_BOUNDARY_HOUR, DAYTIME_END_HOUR, Day, ForecastError, MORNING_END_HOUR, Period};

/// Maps an hour-of-day to its period.
///
///   morning = [0, 9]
///   daytime = (9, 18]
///   night   = everything else, including out-of-range hours
pub fn classify_period(hour: u32) -> Period {
    if hour <= MORNING_END_HOUR {
        Period::Morning
    } else if hour <= DAYTIME_END_HOUR {
        Period::Daytime
    } else {
        Period::Night
    }
}

/// Slots up to and including `day_boundary` are day 1, the rest day 2.
pub fn classify_day(index: usize, day_boundary: usize) -> Day {
    if index <= day_boundary { Day::One } else { Day::Two }
}

/// Finds the index of the last slot of day 1: the first slot at hour 21.
pub fn resolve_day_boundary(hours: &[u32]) -> Result<usize, ForecastError> {
    hours
        .iter()
        .position(|&h| h == DAY_BOUNDARY_HOUR)
        .ok_or(ForecastError::DayBoundaryUnresolved)
}
