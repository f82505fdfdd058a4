//! Shared test fixtures: a recording mock repository and plan builders.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use mnemo_core::errors::{MnemoResult, StorageFailure};
use mnemo_core::memory::MemoryType;
use mnemo_core::models::{
    CreationRecord, DerivedMemoryDraft, MemoryId, ReconsolidationPlan, ResolvedSupersession,
    ScopeId,
};
use mnemo_core::traits::IMemoryRepository;

/// In-memory repository that records every call and can be scripted to fail
/// or to respond slowly.
///
/// Assigned IDs are deterministic (`mem-0`, `mem-1`, …) so tests can assert
/// positional alignment.
#[derive(Default)]
pub struct RecordingRepository {
    next_id: AtomicUsize,
    calls: Mutex<RecordedCalls>,
    latency: Option<Duration>,
    fail_bulk_upsert: Option<String>,
    fail_mark_superseded: Option<String>,
    fail_increment_cycles: Option<String>,
}

#[derive(Default)]
struct RecordedCalls {
    upserts: Vec<(ScopeId, Vec<CreationRecord>)>,
    supersessions: Vec<(ScopeId, Vec<ResolvedSupersession>)>,
    increments: Vec<(ScopeId, Vec<MemoryId>)>,
}

impl RecordingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long (tokio clock) inside every repository call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Script `bulk_upsert` to fail with the given message.
    pub fn failing_bulk_upsert(mut self, message: impl Into<String>) -> Self {
        self.fail_bulk_upsert = Some(message.into());
        self
    }

    /// Script `mark_superseded` to fail with the given message.
    pub fn failing_mark_superseded(mut self, message: impl Into<String>) -> Self {
        self.fail_mark_superseded = Some(message.into());
        self
    }

    /// Script `increment_sleep_cycles` to fail with the given message.
    pub fn failing_increment_cycles(mut self, message: impl Into<String>) -> Self {
        self.fail_increment_cycles = Some(message.into());
        self
    }

    pub fn upsert_calls(&self) -> Vec<(ScopeId, Vec<CreationRecord>)> {
        self.calls.lock().unwrap().upserts.clone()
    }

    pub fn supersession_calls(&self) -> Vec<(ScopeId, Vec<ResolvedSupersession>)> {
        self.calls.lock().unwrap().supersessions.clone()
    }

    pub fn increment_calls(&self) -> Vec<(ScopeId, Vec<MemoryId>)> {
        self.calls.lock().unwrap().increments.clone()
    }

    /// Total repository calls of any kind.
    pub fn total_calls(&self) -> usize {
        let calls = self.calls.lock().unwrap();
        calls.upserts.len() + calls.supersessions.len() + calls.increments.len()
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl IMemoryRepository for RecordingRepository {
    async fn bulk_upsert(
        &self,
        scope: &ScopeId,
        records: &[CreationRecord],
    ) -> MnemoResult<Vec<MemoryId>> {
        self.simulate_latency().await;
        if let Some(message) = &self.fail_bulk_upsert {
            return Err(StorageFailure::new(message.clone()).into());
        }
        let ids: Vec<MemoryId> = records
            .iter()
            .map(|_| {
                let n = self.next_id.fetch_add(1, Ordering::SeqCst);
                MemoryId::from(format!("mem-{n}"))
            })
            .collect();
        self.calls
            .lock()
            .unwrap()
            .upserts
            .push((scope.clone(), records.to_vec()));
        Ok(ids)
    }

    async fn mark_superseded(
        &self,
        scope: &ScopeId,
        pairs: &[ResolvedSupersession],
    ) -> MnemoResult<usize> {
        self.simulate_latency().await;
        if let Some(message) = &self.fail_mark_superseded {
            return Err(StorageFailure::new(message.clone()).into());
        }
        self.calls
            .lock()
            .unwrap()
            .supersessions
            .push((scope.clone(), pairs.to_vec()));
        Ok(pairs.len())
    }

    async fn increment_sleep_cycles(
        &self,
        scope: &ScopeId,
        ids: &[MemoryId],
    ) -> MnemoResult<usize> {
        self.simulate_latency().await;
        if let Some(message) = &self.fail_increment_cycles {
            return Err(StorageFailure::new(message.clone()).into());
        }
        self.calls
            .lock()
            .unwrap()
            .increments
            .push((scope.clone(), ids.to_vec()));
        Ok(ids.len())
    }
}

/// A draft with the given text and sensible defaults.
pub fn draft(text: &str) -> DerivedMemoryDraft {
    DerivedMemoryDraft {
        text: text.to_string(),
        memory_type: MemoryType::Semantic,
        derived_from_ids: Vec::new(),
        relationships: Vec::new(),
        metadata: BTreeMap::new(),
    }
}

/// A plan with `count` drafts and nothing else.
pub fn plan_with_drafts(count: usize) -> ReconsolidationPlan {
    ReconsolidationPlan::from_drafts(
        (0..count)
            .map(|i| draft(&format!("derived insight {i}")))
            .collect(),
    )
}
