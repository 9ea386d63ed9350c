/// Feed acquisition for the forecast service.
///
/// Submodules:
/// - `jma` — JMA two-day point forecast client and parser.

pub mod jma;
