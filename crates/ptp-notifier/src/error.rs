//! Error types for the PTP notifier

use shared_bus::DeliveryError;
use shared_types::EventError;
use thiserror::Error;

/// Errors that abort `EmissionCoordinator::start`
#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to create publication: {0}")]
    Registration(#[from] RegistrarError),

    #[error("Notifier already started")]
    AlreadyStarted,
}

/// Errors from the publication registrar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrarError {
    #[error("Invalid publication request: {0}")]
    InvalidRequest(String),

    #[error("Registrar rejected publication: {0}")]
    Rejected(String),

    #[error("Registrar unavailable: {0}")]
    Unavailable(String),
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Resource address must be an absolute path: {0:?}")]
    InvalidResource(String),

    #[error("Base URL must include a scheme: {0:?}")]
    InvalidBaseUrl(String),

    #[error("Event interval must be non-zero")]
    ZeroInterval,

    #[error("Event interval {secs}s exceeds the maximum of {max_secs}s")]
    IntervalTooLarge { secs: u64, max_secs: u64 },

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// A failed emission. Never fatal; logged and counted at the emission site.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    #[error("Event construction failed: {0}")]
    Build(#[from] EventError),

    #[error("Event delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}
