/// Statistics engine for the two-day forecast.
///
/// Everything here is pure: functions take borrowed series and return owned
/// results, with no I/O and no shared state between calls.
///
/// Submodules:
/// - `periods`    — hour → period and index → day classification.
/// - `extrema`    — tie-aware morning minimum / daytime maximum per day.
/// - `wind_chill` — derived "feels-like" series from temperature and wind.
/// - `report`     — runs the above over a parsed forecast.

pub mod extrema;
pub mod periods;
pub mod report;
pub mod wind_chill;
