/// Core data types for the two-day forecast statistics service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic beyond small accessors, no I/O, and no external
/// dependencies — only types.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Hour-of-day whose slot closes day 1 of the forecast.
///
/// The JMA point forecast is published in 3-hour steps; the 21:00 slot is the
/// last one of the first day.
pub const DAY_BOUNDARY_HOUR: u32 = 21;

/// Last hour (inclusive) of the morning period.
pub const MORNING_END_HOUR: u32 = 9;

/// Last hour (inclusive) of the daytime period.
pub const DAYTIME_END_HOUR: u32 = 18;

// ---------------------------------------------------------------------------
// Series types
// ---------------------------------------------------------------------------

/// Reported wind speed range for one slot, in meters per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindRange {
    pub min: f64,
    pub max: f64,
}

impl WindRange {
    /// Text form used in the rendered table, e.g. `"2-4"`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.min, self.max)
    }
}

/// A parsed two-day forecast, as handed to the statistics engine.
///
/// Every per-slot vector has the same length and index `i` refers to the
/// same time slot in all of them. The daily extremes (`min_temperatures`,
/// `max_temperatures`) follow the feed's own indexing and may be shorter.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    pub area_code: String,
    pub report_datetime: String, // ISO 8601, e.g. "2024-01-10T17:00:00+09:00"
    pub hours: Vec<u32>,
    pub temperatures: Vec<Option<f64>>,
    pub winds: Vec<WindRange>,
    pub weather: Vec<String>,
    pub min_temperatures: Vec<Option<f64>>,
    pub max_temperatures: Vec<Option<f64>>,
}

impl ForecastSeries {
    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    pub fn wind_mins(&self) -> Vec<f64> {
        self.winds.iter().map(|w| w.min).collect()
    }

    pub fn wind_maxs(&self) -> Vec<f64> {
        self.winds.iter().map(|w| w.max).collect()
    }
}

// ---------------------------------------------------------------------------
// Classification types
// ---------------------------------------------------------------------------

/// Coarse period of the day a slot falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Morning,
    Daytime,
    Night,
}

/// Which forecast day a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Day {
    One,
    Two,
}

// ---------------------------------------------------------------------------
// Statistics types
// ---------------------------------------------------------------------------

/// One tie-aware extreme value.
///
/// `value` is `None` when no qualifying sample was seen, in which case
/// `indexes` is empty. Otherwise `indexes` lists every slot that attained
/// `value`, in scan order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extremum {
    pub value: Option<f64>,
    pub indexes: Vec<usize>,
}

impl Extremum {
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indexes.contains(&index)
    }
}

/// Morning minimum and daytime maximum for both forecast days.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtremaResult {
    pub day1_min: Extremum,
    pub day1_max: Extremum,
    pub day2_min: Extremum,
    pub day2_max: Extremum,
}

impl ExtremaResult {
    pub fn min(&self, day: Day) -> &Extremum {
        match day {
            Day::One => &self.day1_min,
            Day::Two => &self.day2_min,
        }
    }

    pub fn max(&self, day: Day) -> &Extremum {
        match day {
            Day::One => &self.day1_max,
            Day::Two => &self.day2_max,
        }
    }

    /// How the cell at `index` should be highlighted.
    ///
    /// Checked in the order day-1 min, day-1 max, day-2 min, day-2 max; the
    /// first match wins.
    pub fn highlight(&self, index: usize) -> Highlight {
        if self.day1_min.contains(index) {
            Highlight::Min
        } else if self.day1_max.contains(index) {
            Highlight::Max
        } else if self.day2_min.contains(index) {
            Highlight::Min
        } else if self.day2_max.contains(index) {
            Highlight::Max
        } else {
            Highlight::None
        }
    }
}

/// Cell marking requested by the statistics for a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Min,
    Max,
    None,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when fetching or processing the JMA forecast.
#[derive(Debug, PartialEq)]
pub enum ForecastError {
    /// Non-2xx HTTP response from the JMA API.
    HttpError(u16),
    /// The request could not be sent or the body could not be read.
    RequestFailed(String),
    /// The response body could not be deserialized.
    ParseError(String),
    /// The body parsed but its series cannot be aligned.
    MalformedFeed(String),
    /// No slot with hour 21 exists, so day 1 and day 2 cannot be split.
    DayBoundaryUnresolved,
}

impl std::fmt::Display for ForecastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForecastError::HttpError(code) => write!(f, "HTTP error: {}", code),
            ForecastError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            ForecastError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ForecastError::MalformedFeed(msg) => write!(f, "Malformed feed: {}", msg),
            ForecastError::DayBoundaryUnresolved => write!(
                f,
                "Day boundary unresolved: no slot at hour {}",
                DAY_BOUNDARY_HOUR
            ),
        }
    }
}

impl std::error::Error for ForecastError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn extremum(value: f64, indexes: &[usize]) -> Extremum {
        Extremum {
            value: Some(value),
            indexes: indexes.to_vec(),
        }
    }

    #[test]
    fn test_highlight_prefers_day1_min_over_later_sets() {
        let stats = ExtremaResult {
            day1_min: extremum(1.0, &[0]),
            day1_max: extremum(9.0, &[0, 2]),
            day2_min: Extremum::default(),
            day2_max: extremum(7.0, &[5]),
        };
        assert_eq!(stats.highlight(0), Highlight::Min);
        assert_eq!(stats.highlight(2), Highlight::Max);
        assert_eq!(stats.highlight(5), Highlight::Max);
        assert_eq!(stats.highlight(3), Highlight::None);
    }

    #[test]
    fn test_wind_range_label_uses_dash() {
        let wind = WindRange { min: 2.0, max: 4.0 };
        assert_eq!(wind.label(), "2-4");
    }

    #[test]
    fn test_day_boundary_error_message_names_hour() {
        let msg = ForecastError::DayBoundaryUnresolved.to_string();
        assert!(msg.contains("21"), "message should mention hour 21: {}", msg);
    }
}
