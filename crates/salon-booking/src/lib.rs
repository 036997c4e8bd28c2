pub mod appointments;
pub mod config;
pub mod error;
pub mod telemetry;
