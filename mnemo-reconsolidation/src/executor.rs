//! ReconsolidationExecutor: applies a plan as batched repository writes.

use mnemo_core::config::defaults::DEFAULT_SLOW_EXECUTION_THRESHOLD_MS;
use mnemo_core::models::{
    CreationRecord, MemoryId, ReconsolidationPlan, ReconsolidationReport, ScopeId,
};
use mnemo_core::traits::IMemoryRepository;
use tracing::{debug, info, warn};

use crate::resolve;

/// Applies a [`ReconsolidationPlan`] in a fixed create → supersede →
/// increment-cycles sequence of batched calls.
///
/// `execute` never fails: each step's failure is folded into the report's
/// notes and the best-effort result is returned. The executor holds no
/// mutable state beyond the repository handle, so one instance serves
/// concurrent executions. No transaction spans the steps; a crash between
/// them can leave created memories without their supersession links.
pub struct ReconsolidationExecutor<R> {
    repository: R,
}

impl<R: IMemoryRepository> ReconsolidationExecutor<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Apply `plan` within `scope`.
    ///
    /// `valid_ids` is the caller-asserted set of memories known to exist
    /// before execution. Diagnostic-only, reserved for referential-integrity
    /// checks; it never affects control flow.
    pub async fn execute(
        &self,
        plan: &ReconsolidationPlan,
        scope: &ScopeId,
        valid_ids: &[MemoryId],
    ) -> ReconsolidationReport {
        let started = tokio::time::Instant::now();
        let mut report = ReconsolidationReport::default();

        if let Some(notes) = &plan.notes {
            report.notes.push(notes.clone());
        }
        self.log_unknown_sources(plan, valid_ids);

        if self.create_derived(plan, scope, &mut report).await {
            self.apply_supersessions(plan, scope, &mut report).await;
            self.increment_sleep_cycles(plan, scope, &mut report).await;
        }

        report.duration_ms = started.elapsed().as_millis() as u64;
        if report.duration_ms > DEFAULT_SLOW_EXECUTION_THRESHOLD_MS {
            report.notes.push(format!(
                "Reconsolidation took {}ms (threshold: {}ms)",
                report.duration_ms, DEFAULT_SLOW_EXECUTION_THRESHOLD_MS
            ));
        }
        report
    }

    /// Step 1: one batched upsert for all drafts. Returns `false` when the
    /// call failed, which cancels the remaining steps.
    async fn create_derived(
        &self,
        plan: &ReconsolidationPlan,
        scope: &ScopeId,
        report: &mut ReconsolidationReport,
    ) -> bool {
        if plan.derived_memories.is_empty() {
            return true;
        }
        let records: Vec<CreationRecord> = plan
            .derived_memories
            .iter()
            .map(CreationRecord::from_draft)
            .collect();
        match self.repository.bulk_upsert(scope, &records).await {
            Ok(ids) => {
                info!(scope = %scope, created = ids.len(), "created derived memories");
                report.created_memory_ids = ids;
                true
            }
            Err(error) => {
                warn!(scope = %scope, error = %error, "creation failed, skipping remaining steps");
                report.notes.push(format!("Partial execution: {error}"));
                false
            }
        }
    }

    /// Step 2: resolve positional references against the created IDs, then
    /// one batched supersede call. Resolved pairs land in the report only
    /// once the write succeeded.
    async fn apply_supersessions(
        &self,
        plan: &ReconsolidationPlan,
        scope: &ScopeId,
        report: &mut ReconsolidationReport,
    ) {
        if plan.supersession_pairs.is_empty() {
            return;
        }
        let resolved =
            match resolve::resolve_pairs(&plan.supersession_pairs, &report.created_memory_ids) {
                Ok(resolved) => resolved,
                Err(error) => {
                    warn!(scope = %scope, error = %error, "unresolvable supersession reference");
                    report.notes.push(format!("Partial execution: {error}"));
                    return;
                }
            };
        match self.repository.mark_superseded(scope, &resolved).await {
            Ok(applied) => {
                debug!(scope = %scope, requested = resolved.len(), applied, "superseded memories");
                report.superseded_pairs = resolved;
            }
            Err(error) => {
                warn!(scope = %scope, error = %error, "supersession step failed");
                report.notes.push(format!("Partial execution: {error}"));
            }
        }
    }

    /// Step 3: bump the cycle counter on the plan's targets plus everything
    /// just created, deduplicated.
    async fn increment_sleep_cycles(
        &self,
        plan: &ReconsolidationPlan,
        scope: &ScopeId,
        report: &mut ReconsolidationReport,
    ) {
        let targets =
            resolve::dedupe_union(&plan.sleep_cycle_targets, &report.created_memory_ids);
        if targets.is_empty() {
            return;
        }
        match self.repository.increment_sleep_cycles(scope, &targets).await {
            Ok(applied) => {
                debug!(scope = %scope, requested = targets.len(), applied, "incremented sleep cycles");
                report.sleep_cycle_incremented_ids = targets;
            }
            Err(error) => {
                warn!(scope = %scope, error = %error, "sleep-cycle step failed");
                report.notes.push(format!("Partial execution: {error}"));
            }
        }
    }

    /// Diagnostic only: count claimed source memories outside the
    /// caller-asserted valid set.
    fn log_unknown_sources(&self, plan: &ReconsolidationPlan, valid_ids: &[MemoryId]) {
        if valid_ids.is_empty() {
            return;
        }
        let unknown = plan
            .derived_memories
            .iter()
            .flat_map(|draft| draft.derived_from_ids.iter())
            .filter(|idm| !valid_ids.contains(idm))
            .count();
        if unknown > 0 {
            debug!(unknown, "plan references source memories outside the asserted valid set");
        }
    }
}
