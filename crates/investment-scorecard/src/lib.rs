pub mod config;
pub mod error;
pub mod export;
pub mod scorecard;
pub mod session;
pub mod telemetry;
