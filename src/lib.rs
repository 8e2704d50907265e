pub mod config;
pub mod error;
pub mod matching;
pub mod store;
pub mod telemetry;
