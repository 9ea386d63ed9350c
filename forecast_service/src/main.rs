use std::process::ExitCode;
use std::time::Duration;

use forecast_service::analysis::report::{ForecastReport, build_report};
use forecast_service::config::{self, ServiceConfig};
use forecast_service::ingest::jma;
use forecast_service::logging::{self, DataSource, LogLevel};
use forecast_service::model::Day;
use forecast_service::render::{GlyphTable, RenderOptions, render_report};

/// Shown to the user for any failure; details go to the log.
const FAILURE_NOTICE: &str =
    "An error occurred while fetching or processing the forecast from the Japan Meteorological Agency.";

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Defaults until the config says otherwise, so config failures are logged too.
    logging::init_logger(LogLevel::Info, None, false);

    let config = match config::load_from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", FAILURE_NOTICE);
            logging::log_config_failure(&e);
            return ExitCode::FAILURE;
        }
    };

    // Validated by config::parse_config; defaults otherwise.
    let min_level = config.logging.min_level().unwrap_or(LogLevel::Info);
    logging::init_logger(min_level, config.logging.file.as_deref(), config.logging.timestamps);

    match run(&config) {
        Ok(table) => {
            print!("{}", table);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", FAILURE_NOTICE);
            logging::log_feed_failure(&config.feed.area_code, "Forecast run", &*e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &ServiceConfig) -> Result<String, Box<dyn std::error::Error>> {
    let area_code = config.feed.area_code.as_str();

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.feed.timeout_secs))
        .build()?;

    logging::debug(
        DataSource::Jma,
        Some(area_code),
        &jma::build_forecast_url(&config.feed.base_url, area_code),
    );
    let series = jma::fetch_forecast(&client, &config.feed.base_url, area_code)?;

    let report = build_report(&series)?;
    logging::log_run_summary(area_code, series.len(), count_unset(&report));

    let glyphs = GlyphTable::default().with_overrides(&config.glyphs);
    let options = RenderOptions {
        color: config.render.color,
    };
    Ok(render_report(&report, &series, &glyphs, &options))
}

fn count_unset(report: &ForecastReport) -> usize {
    [&report.temperature_stats, &report.wind_chill_stats]
        .iter()
        .flat_map(|s| [Day::One, Day::Two].map(|day| [s.min(day), s.max(day)]))
        .flatten()
        .filter(|e| !e.is_set())
        .count()
}
