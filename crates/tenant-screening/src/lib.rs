//! Tenant application screening: intake records, screening sub-checks, weighted scoring, and
//! review decisions for rental candidates.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
