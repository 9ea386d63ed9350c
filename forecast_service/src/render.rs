//! Text rendering of a forecast report.
//!
//! Produces a short summary followed by a table with one column per slot.
//! Cells holding a morning minimum or daytime maximum are highlighted, either
//! with ANSI colours or, when colour is off, with a `v` (minimum) or `^`
//! (maximum) suffix, e.g. `2v`.

use std::collections::HashMap;
use std::fmt::Write;

use crate::analysis::report::ForecastReport;
use crate::model::{ExtremaResult, ForecastSeries, Highlight};

/// Shown wherever a statistic had no qualifying sample.
pub const PLACEHOLDER: &str = "---";

const CELL_WIDTH: usize = 7;
const LABEL_WIDTH: usize = 12;

const ANSI_MIN: &str = "\x1b[1;34m";
const ANSI_MAX: &str = "\x1b[1;31m";
const ANSI_RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// Weather glyphs
// ---------------------------------------------------------------------------

/// Weather code → display glyph. Unknown codes pass through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphTable {
    glyphs: HashMap<String, String>,
}

impl GlyphTable {
    pub fn new(glyphs: HashMap<String, String>) -> Self {
        Self { glyphs }
    }

    /// Adds or replaces entries, e.g. from the `[glyphs]` config table.
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Self {
        self.glyphs
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn glyph<'a>(&'a self, code: &'a str) -> &'a str {
        self.glyphs.get(code).map(String::as_str).unwrap_or(code)
    }
}

impl Default for GlyphTable {
    fn default() -> Self {
        let glyphs = [("晴れ", "☀️"), ("くもり", "☁️"), ("雨", "☔")]
            .into_iter()
            .map(|(code, glyph)| (code.to_string(), glyph.to_string()))
            .collect();
        Self { glyphs }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
}

pub fn render_report(
    report: &ForecastReport,
    series: &ForecastSeries,
    glyphs: &GlyphTable,
    options: &RenderOptions,
) -> String {
    let mut out = String::new();

    let chill = &report.wind_chill_stats;
    let _ = writeln!(out, "Area {} (issued {})", series.area_code, series.report_datetime);
    let _ = writeln!(
        out,
        "Low {}  High {}  Feels like {} .. {}",
        format_value(report.day1_low, PLACEHOLDER),
        format_value(report.day1_high, PLACEHOLDER),
        format_value(chill.day1_min.value, PLACEHOLDER),
        format_value(chill.day1_max.value, PLACEHOLDER),
    );
    out.push('\n');

    let hours: Vec<String> = series.hours.iter().map(|h| h.to_string()).collect();
    push_plain_row(&mut out, "Time", &hours);

    let weather: Vec<String> = series
        .weather
        .iter()
        .map(|code| glyphs.glyph(code).to_string())
        .collect();
    push_plain_row(&mut out, "Weather", &weather);

    push_stat_row(&mut out, "Wind chill", &report.wind_chills, chill, options);
    push_stat_row(
        &mut out,
        "Temp",
        &series.temperatures,
        &report.temperature_stats,
        options,
    );

    let winds: Vec<String> = series.winds.iter().map(|w| w.label()).collect();
    push_plain_row(&mut out, "Wind (m/s)", &winds);

    out
}

fn push_plain_row(out: &mut String, label: &str, cells: &[String]) {
    let _ = write!(out, "{:<width$}", label, width = LABEL_WIDTH);
    for cell in cells {
        out.push_str(&pad_left(cell, CELL_WIDTH));
    }
    out.push('\n');
}

/// Right-aligns `text` to `width` terminal columns.
fn pad_left(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(text));
    format!("{}{}", " ".repeat(padding), text)
}

/// Terminal columns taken by `text`.
///
/// Covers what weather codes and glyphs contain: ASCII, CJK, and emoji,
/// including the emoji-presentation selector (U+FE0F) that widens a symbol
/// like `☀` to two columns.
fn display_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\u{200D}' | '\u{FE0E}' | '\u{FE0F}' => {}
            _ if chars.peek() == Some(&'\u{FE0F}') => width += 2,
            _ if is_wide(c) => width += 2,
            _ => width += 1,
        }
    }
    width
}

fn is_wide(c: char) -> bool {
    matches!(
        c as u32,
        0x1100..=0x115F
            | 0x2614..=0x2615
            | 0x2E80..=0x303E
            | 0x3041..=0x33FF
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
            | 0x1F300..=0x1FAFF
    )
}

fn push_stat_row(
    out: &mut String,
    label: &str,
    values: &[Option<f64>],
    stats: &ExtremaResult,
    options: &RenderOptions,
) {
    let _ = write!(out, "{:<width$}", label, width = LABEL_WIDTH);
    for (index, value) in values.iter().enumerate() {
        let text = format_value(*value, "-");
        out.push_str(&highlight_cell(&text, stats.highlight(index), options));
    }
    out.push('\n');
}

/// Pads first so escape sequences do not count towards the column width.
fn highlight_cell(text: &str, highlight: Highlight, options: &RenderOptions) -> String {
    match (highlight, options.color) {
        (Highlight::None, _) => format!("{:>width$}", text, width = CELL_WIDTH),
        (Highlight::Min, true) => {
            format!("{}{:>width$}{}", ANSI_MIN, text, ANSI_RESET, width = CELL_WIDTH)
        }
        (Highlight::Max, true) => {
            format!("{}{:>width$}{}", ANSI_MAX, text, ANSI_RESET, width = CELL_WIDTH)
        }
        (Highlight::Min, false) => {
            format!("{:>width$}", format!("{}v", text), width = CELL_WIDTH)
        }
        (Highlight::Max, false) => {
            format!("{:>width$}", format!("{}^", text), width = CELL_WIDTH)
        }
    }
}

fn format_value(value: Option<f64>, absent: &str) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| absent.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::report::build_report;
    use crate::model::WindRange;

    fn series() -> ForecastSeries {
        ForecastSeries {
            area_code: "130010".to_string(),
            report_datetime: "2024-01-10T05:00:00+09:00".to_string(),
            hours: vec![6, 12, 21, 3, 15],
            temperatures: vec![Some(2.0), Some(9.0), Some(5.0), Some(1.0), None],
            winds: vec![WindRange { min: 2.0, max: 4.0 }; 5],
            weather: vec![
                "晴れ".to_string(),
                "くもり".to_string(),
                "雪".to_string(),
                "雨".to_string(),
                "晴れ".to_string(),
            ],
            min_temperatures: vec![Some(1.0)],
            max_temperatures: vec![],
        }
    }

    fn plain() -> RenderOptions {
        RenderOptions { color: false }
    }

    #[test]
    fn test_unknown_weather_code_passes_through() {
        let table = GlyphTable::default();
        assert_eq!(table.glyph("晴れ"), "☀️");
        assert_eq!(table.glyph("雪"), "雪");
    }

    #[test]
    fn test_overrides_extend_table() {
        let mut extra = HashMap::new();
        extra.insert("雪".to_string(), "❄️".to_string());
        let table = GlyphTable::default().with_overrides(&extra);
        assert_eq!(table.glyph("雪"), "❄️");
        assert_eq!(table.glyph("雨"), "☔");
    }

    #[test]
    fn test_summary_shows_placeholder_for_absent_values() {
        let s = series();
        let report = build_report(&s).expect("boundary present");
        let text = render_report(&report, &s, &GlyphTable::default(), &plain());

        assert!(text.contains("Low 1"), "{}", text);
        assert!(text.contains("High ---"), "{}", text);
    }

    #[test]
    fn test_plain_output_marks_extremes() {
        let s = series();
        let report = build_report(&s).expect("boundary present");
        let text = render_report(&report, &s, &GlyphTable::default(), &plain());

        let temp_row = text
            .lines()
            .find(|l| l.starts_with("Temp"))
            .expect("temperature row");
        assert!(temp_row.contains("2v"), "{}", temp_row);
        assert!(temp_row.contains("9^"), "{}", temp_row);
        assert!(temp_row.contains("1v"), "{}", temp_row);
        assert!(!temp_row.contains("5v") && !temp_row.contains("5^"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_color_output_uses_ansi() {
        let s = series();
        let report = build_report(&s).expect("boundary present");
        let text = render_report(
            &report,
            &s,
            &GlyphTable::default(),
            &RenderOptions { color: true },
        );
        assert!(text.contains(ANSI_MIN));
        assert!(text.contains(ANSI_MAX));
    }

    #[test]
    fn test_display_width_counts_wide_glyphs() {
        assert_eq!(display_width("12"), 2);
        assert_eq!(display_width("☀️"), 2);
        assert_eq!(display_width("☁️"), 2);
        assert_eq!(display_width("☔"), 2);
        assert_eq!(display_width("雪"), 2);
        assert_eq!(display_width("2-4"), 3);
    }

    #[test]
    fn test_weather_row_lines_up_with_time_row() {
        let s = series();
        let report = build_report(&s).expect("boundary present");
        let text = render_report(&report, &s, &GlyphTable::default(), &plain());

        let time_row = text.lines().find(|l| l.starts_with("Time")).expect("time row");
        let weather_row = text
            .lines()
            .find(|l| l.starts_with("Weather"))
            .expect("weather row");
        assert_eq!(display_width(time_row), LABEL_WIDTH + CELL_WIDTH * 5);
        assert_eq!(display_width(weather_row), display_width(time_row));
    }

    #[test]
    fn test_rows_have_one_cell_per_slot() {
        let s = series();
        let report = build_report(&s).expect("boundary present");
        let text = render_report(&report, &s, &GlyphTable::default(), &plain());

        let wind_row = text
            .lines()
            .find(|l| l.starts_with("Wind (m/s)"))
            .expect("wind row");
        assert_eq!(wind_row.matches("2-4").count(), 5);
        assert!(text.contains("☁️"));
    }
}
