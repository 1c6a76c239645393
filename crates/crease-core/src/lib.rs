// Library root: batting-stats loading, cleaning and querying. The dashboard
// binary and integration tests consume this public API.

pub mod config;
pub mod dataset;
pub mod query;
pub mod stats;
