//! Wind chill ("feels-like") temperature.
//!
//! Uses the JAG/TI wind chill index with the wind speed taken as the
//! midpoint of the reported range:
//!
//!   WCI = 13.12 + 0.6215·T − 11.37·V^0.16 + 0.3965·T·V^0.16
//!
//! where T is air temperature in °C and V is wind speed in km/h. Results are
//! rounded to one decimal place, half away from zero.

const MS_TO_KMH: f64 = 3.6;

/// Wind chill for a single slot.
///
/// `wind_min` and `wind_max` are in m/s. No ordering check is made between
/// them; the midpoint is used as-is.
pub fn wind_chill(temperature: f64, wind_min: f64, wind_max: f64) -> f64 {
    let wind_speed_avg = (wind_min + wind_max) / 2.0;
    let wind_speed_kmh = wind_speed_avg * MS_TO_KMH;
    let v = wind_speed_kmh.powf(0.16);

    let chill = 13.12 + 0.6215 * temperature - 11.37 * v + 0.3965 * temperature * v;
    round_one_decimal(chill)
}

/// Element-wise wind chill over parallel series.
///
/// Absent temperatures yield absent chills. The output has one entry per
/// temperature; callers pass wind series of the same length.
pub fn wind_chill_series(
    temperatures: &[Option<f64>],
    wind_mins: &[f64],
    wind_maxs: &[f64],
) -> Vec<Option<f64>> {
    temperatures
        .iter()
        .zip(wind_mins.iter().zip(wind_maxs))
        .map(|(temp, (&min, &max))| temp.map(|t| wind_chill(t, min, max)))
        .collect()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
