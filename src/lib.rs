//! Screening engine and service surfaces for field crew assignment.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
