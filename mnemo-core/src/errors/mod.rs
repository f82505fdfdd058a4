//! Error types for all mnemo subsystems.

mod config_error;
mod reconsolidation_error;
mod storage_failure;

pub use config_error::ConfigError;
pub use reconsolidation_error::ReconsolidationError;
pub use storage_failure::StorageFailure;

/// Convenience alias used across all mnemo crates.
pub type MnemoResult<T> = Result<T, MnemoError>;

/// Top-level error wrapping each subsystem's error type.
#[derive(Debug, thiserror::Error)]
pub enum MnemoError {
    /// A structured failure raised by the repository layer. Displays as the
    /// failure's own message.
    #[error(transparent)]
    StorageFailure(#[from] StorageFailure),

    #[error("reconsolidation error: {0}")]
    ReconsolidationError(#[from] ReconsolidationError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),
}
