//! Transient-failure classification.

use mnemo_core::errors::MnemoError;

/// Message substrings that mark a failure as transient.
const TRANSIENT_SIGNATURES: [&str; 8] = [
    "timeout",
    "econnrefused",
    "etimedout",
    "econnreset",
    "rate limit",
    "429",
    "503",
    "service unavailable",
];

/// Decides whether a failed operation is worth retrying.
///
/// Injectable into [`RetryPolicy`](crate::RetryPolicy) so the loop can serve
/// other failure taxonomies unchanged.
pub trait RetryClassifier: Send + Sync {
    /// Whether the failure is transient — a retry may succeed.
    fn is_transient(&self, error: &MnemoError) -> bool;
}

/// Default classifier: matches the lowercased failure message against a fixed
/// set of network/timeout/rate-limit signatures.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransientSignatureClassifier;

impl RetryClassifier for TransientSignatureClassifier {
    fn is_transient(&self, error: &MnemoError) -> bool {
        let message = error.to_string().to_lowercase();
        TRANSIENT_SIGNATURES.iter().any(|sig| message.contains(sig))
    }
}
