//! Two-day forecast statistics service.
//!
//! Fetches the JMA point forecast for an area, finds the morning minimum and
//! daytime maximum of each day (keeping every tied slot), derives a wind
//! chill series and runs the same statistics over it, then renders the
//! result as a text table.

pub mod analysis;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod render;
