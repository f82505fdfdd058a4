//! Structured failure diagnostics for the repository layer.

use std::collections::BTreeMap;
use std::panic::Location;

/// A structured failure raised by the repository layer.
///
/// Pure data: a human-readable message enriched with the backend error code,
/// remediation hints, and the lower-level cause. `raised_at` records the call
/// site at which the failure was constructed, independent of where its cause
/// originated.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct StorageFailure {
    /// Human-readable description of what failed.
    pub message: String,
    /// Low-level backend error code, when the backend supplied one.
    pub code: Option<String>,
    /// Actionable remediation hint.
    pub hint: Option<String>,
    /// Candidate fixes, most likely first.
    pub suggested_fixes: Vec<String>,
    /// Free-form diagnostic payload.
    pub details: BTreeMap<String, serde_json::Value>,
    /// The lower-level failure that triggered this one.
    #[source]
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    /// Where this failure was raised.
    pub raised_at: &'static Location<'static>,
}

impl StorageFailure {
    /// Create a failure with the given message, capturing the caller's
    /// location as the raise site.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            hint: None,
            suggested_fixes: Vec::new(),
            details: BTreeMap::new(),
            cause: None,
            raised_at: Location::caller(),
        }
    }

    /// Attach the backend's error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Append a suggested fix.
    pub fn with_suggested_fix(mut self, fix: impl Into<String>) -> Self {
        self.suggested_fixes.push(fix.into());
        self
    }

    /// Attach one diagnostic key/value pair.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Attach the underlying failure.
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}
