use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::screening::StorageError;

/// Failures that stop a command or the service from starting.
///
/// Screening operations themselves never fail; only startup, reloading the store and
/// serving can.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("could not load screening applications: {0}")]
    Storage(#[from] StorageError),
}
