/// Configuration subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {reason}")]
    ParseFailed { reason: String },
}
