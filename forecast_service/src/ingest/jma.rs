/// JMA (Japan Meteorological Agency) point forecast client
///
/// Retrieves the "wdist VPFD" two-day forecast for one area: 3-hourly
/// weather, wind speed range and temperature, plus the day's official
/// minimum and maximum temperature.
///
/// Endpoint: https://www.jma.go.jp/bosai/jmatile/data/wdist/VPFD/{area}.json

use chrono::{DateTime, Timelike};
use serde::Deserialize;
use serde_json::Value;

use crate::model::{ForecastError, ForecastSeries, WindRange};

pub const JMA_BASE_URL: &str = "https://www.jma.go.jp";

/// Tokyo area code, used when nothing else is configured.
pub const DEFAULT_AREA_CODE: &str = "130010";

// ============================================================================
// JMA API Response Structures
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JmaForecastResponse {
    #[serde(default)]
    pub report_datetime: String,
    pub area_time_series: JmaAreaTimeSeries,
    pub point_time_series: JmaPointTimeSeries,
}

/// Area-wide series: one entry per forecast slot.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JmaAreaTimeSeries {
    pub time_defines: Vec<JmaTimeDefine>,
    pub weather: Vec<String>,
    pub wind: Vec<JmaWind>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JmaTimeDefine {
    pub date_time: String, // ISO 8601 with offset, e.g. "2024-01-10T18:00:00+09:00"
}

#[derive(Debug, Deserialize)]
pub struct JmaWind {
    #[serde(default)]
    pub direction: String,
    pub range: String, // "min max" in m/s, e.g. "2 4"
}

/// Point (observatory) series. Readings arrive as numbers, numeric strings,
/// empty strings or nulls, so they are kept as raw JSON until parsed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JmaPointTimeSeries {
    pub temperature: Vec<Value>,
    #[serde(default)]
    pub min_temperature: Vec<Value>,
    #[serde(default)]
    pub max_temperature: Vec<Value>,
}

// ============================================================================
// API Client Functions
// ============================================================================

/// Builds the forecast URL for an area.
pub fn build_forecast_url(base_url: &str, area_code: &str) -> String {
    format!(
        "{}/bosai/jmatile/data/wdist/VPFD/{}.json",
        base_url.trim_end_matches('/'),
        area_code
    )
}

/// Fetch and parse the current forecast for an area
///
/// # Parameters
/// - `client`: HTTP client
/// - `base_url`: JMA host, normally `JMA_BASE_URL`
/// - `area_code`: JMA area code (e.g., "130010")
pub fn fetch_forecast(
    client: &reqwest::blocking::Client,
    base_url: &str,
    area_code: &str,
) -> Result<ForecastSeries, ForecastError> {
    let url = build_forecast_url(base_url, area_code);

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .map_err(|e| ForecastError::RequestFailed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(ForecastError::HttpError(response.status().as_u16()));
    }

    let body = response
        .text()
        .map_err(|e| ForecastError::RequestFailed(e.to_string()))?;

    parse_forecast(&body, area_code)
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a VPFD response body into aligned per-slot series.
///
/// The point temperature series always carries one trailing sample beyond
/// the area series; it is dropped here so every series has the same length.
pub fn parse_forecast(json: &str, area_code: &str) -> Result<ForecastSeries, ForecastError> {
    let response: JmaForecastResponse =
        serde_json::from_str(json).map_err(|e| ForecastError::ParseError(e.to_string()))?;

    let area = response.area_time_series;
    let point = response.point_time_series;

    let hours = area
        .time_defines
        .iter()
        .map(|t| parse_hour(&t.date_time))
        .collect::<Result<Vec<_>, _>>()?;

    let mut temperatures = parse_readings(&point.temperature)?;
    if temperatures.pop().is_none() {
        return Err(ForecastError::MalformedFeed(
            "temperature series is empty".to_string(),
        ));
    }

    let winds = area
        .wind
        .iter()
        .map(|w| parse_wind_range(&w.range))
        .collect::<Result<Vec<_>, _>>()?;

    for (name, len) in [
        ("temperature", temperatures.len()),
        ("wind", winds.len()),
        ("weather", area.weather.len()),
    ] {
        if len != hours.len() {
            return Err(ForecastError::MalformedFeed(format!(
                "{} series has {} slots, expected {}",
                name,
                len,
                hours.len()
            )));
        }
    }

    Ok(ForecastSeries {
        area_code: area_code.to_string(),
        report_datetime: response.report_datetime,
        hours,
        temperatures,
        winds,
        weather: area.weather,
        min_temperatures: parse_readings(&point.min_temperature)?,
        max_temperatures: parse_readings(&point.max_temperature)?,
    })
}

/// Parses a `"min max"` wind range (m/s).
pub fn parse_wind_range(text: &str) -> Result<WindRange, ForecastError> {
    let mut parts = text.split_whitespace().map(|p| p.parse::<f64>());

    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(min)), Some(Ok(max)), None) => Ok(WindRange { min, max }),
        _ => Err(ForecastError::ParseError(format!(
            "invalid wind range: {:?}",
            text
        ))),
    }
}

/// Hour-of-day in the timestamp's own offset (JST for JMA feeds).
fn parse_hour(date_time: &str) -> Result<u32, ForecastError> {
    DateTime::parse_from_rfc3339(date_time)
        .map(|dt| dt.hour())
        .map_err(|e| ForecastError::ParseError(format!("timestamp {:?}: {}", date_time, e)))
}

fn parse_readings(values: &[Value]) -> Result<Vec<Option<f64>>, ForecastError> {
    values.iter().map(parse_reading).collect()
}

/// Numbers and numeric strings are readings; null and "" are absent.
fn parse_reading(value: &Value) -> Result<Option<f64>, ForecastError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ForecastError::ParseError(format!("invalid reading: {:?}", s))),
        other => Err(ForecastError::ParseError(format!(
            "unexpected reading: {}",
            other
        ))),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn body(temperature: &str) -> String {
        format!(
            r#"{{
                "reportDatetime": "2024-01-10T05:00:00+09:00",
                "areaTimeSeries": {{
                    "timeDefines": [
                        {{"dateTime": "2024-01-10T06:00:00+09:00"}},
                        {{"dateTime": "2024-01-10T21:00:00+09:00"}},
                        {{"dateTime": "2024-01-11T12:00:00+09:00"}}
                    ],
                    "weather": ["晴れ", "くもり", "雨"],
                    "wind": [
                        {{"direction": "北", "range": "2 4"}},
                        {{"direction": "北", "range": "3 5"}},
                        {{"direction": "南", "range": "1 3"}}
                    ]
                }},
                "pointTimeSeries": {{
                    "temperature": {},
                    "minTemperature": [null, "3", ""],
                    "maxTemperature": [12, null, null]
                }}
            }}"#,
            temperature
        )
    }

    #[test]
    fn test_build_forecast_url() {
        assert_eq!(
            build_forecast_url(JMA_BASE_URL, DEFAULT_AREA_CODE),
            "https://www.jma.go.jp/bosai/jmatile/data/wdist/VPFD/130010.json"
        );
        assert_eq!(
            build_forecast_url("http://localhost:8080/", "270000"),
            "http://localhost:8080/bosai/jmatile/data/wdist/VPFD/270000.json"
        );
    }

    #[test]
    fn test_parse_drops_trailing_temperature() {
        let series = parse_forecast(&body("[1, 2, 3, 99]"), "130010").expect("valid body");
        assert_eq!(series.temperatures, vec![Some(1.0), Some(2.0), Some(3.0)]);
        assert_eq!(series.hours, vec![6, 21, 12]);
        assert_eq!(series.winds[1], WindRange { min: 3.0, max: 5.0 });
        assert_eq!(series.weather[2], "雨");
        assert_eq!(series.report_datetime, "2024-01-10T05:00:00+09:00");
    }

    #[test]
    fn test_parse_daily_extremes_accept_strings_and_gaps() {
        let series = parse_forecast(&body("[1, 2, 3, 4]"), "130010").expect("valid body");
        assert_eq!(series.min_temperatures, vec![None, Some(3.0), None]);
        assert_eq!(series.max_temperatures, vec![Some(12.0), None, None]);
    }

    #[test]
    fn test_parse_absent_temperatures() {
        let series = parse_forecast(&body(r#"[null, "", "-1.5", 0]"#), "130010")
            .expect("valid body");
        assert_eq!(series.temperatures, vec![None, None, Some(-1.5)]);
    }

    #[test]
    fn test_hour_uses_timestamp_offset() {
        assert_eq!(parse_hour("2024-01-10T21:00:00+09:00"), Ok(21));
        assert_eq!(parse_hour("2024-01-10T12:00:00Z"), Ok(12));
        assert!(parse_hour("yesterday").is_err());
    }

    #[test]
    fn test_temperature_count_mismatch_is_malformed() {
        let result = parse_forecast(&body("[1, 2, 3]"), "130010");
        assert!(
            matches!(result, Err(ForecastError::MalformedFeed(_))),
            "got {:?}",
            result
        );
    }

    #[test]
    fn test_empty_temperature_series_is_malformed() {
        let result = parse_forecast(&body("[]"), "130010");
        assert!(matches!(result, Err(ForecastError::MalformedFeed(_))));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let result = parse_forecast("{not json", "130010");
        assert!(matches!(result, Err(ForecastError::ParseError(_))));
    }

    #[test]
    fn test_parse_wind_range() {
        assert_eq!(parse_wind_range("2 4"), Ok(WindRange { min: 2.0, max: 4.0 }));
        assert_eq!(parse_wind_range(" 0  1.5 "), Ok(WindRange { min: 0.0, max: 1.5 }));
        assert!(parse_wind_range("4").is_err());
        assert!(parse_wind_range("2 4 6").is_err());
        assert!(parse_wind_range("calm wind").is_err());
    }
}
