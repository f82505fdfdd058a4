use crate::errors::MnemoResult;
use crate::models::{CreationRecord, MemoryId, ResolvedSupersession, ScopeId};

/// The storage backend the reconsolidation core writes through.
///
/// Every operation is one batched call, atomic per call; no transaction spans
/// multiple calls. A failed call may carry a
/// [`StorageFailure`](crate::errors::StorageFailure) with backend diagnostics.
/// Implementations are expected to wrap their network I/O in the resilience
/// layer's retry policy.
#[allow(async_fn_in_trait)]
pub trait IMemoryRepository: Send + Sync {
    /// Create one memory per record, returning the assigned IDs in input order.
    async fn bulk_upsert(
        &self,
        scope: &ScopeId,
        records: &[CreationRecord],
    ) -> MnemoResult<Vec<MemoryId>>;

    /// Mark each pair's source memory as superseded by its replacement.
    /// Returns the number of links applied.
    async fn mark_superseded(
        &self,
        scope: &ScopeId,
        pairs: &[ResolvedSupersession],
    ) -> MnemoResult<usize>;

    /// Bump the consolidation-cycle counter on each memory. Returns the
    /// number of counters bumped.
    async fn increment_sleep_cycles(
        &self,
        scope: &ScopeId,
        ids: &[MemoryId],
    ) -> MnemoResult<usize>;
}
