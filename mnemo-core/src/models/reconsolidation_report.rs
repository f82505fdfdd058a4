use serde::{Deserialize, Serialize};

use super::ids::MemoryId;

/// Outcome of applying one reconsolidation plan.
///
/// Always produced, even under partial failure. Callers inspect `notes` for
/// `"Partial execution"` markers rather than catching an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconsolidationReport {
    /// Newly created memory IDs, positionally aligned with the plan's drafts.
    /// Empty when the creation step failed or the plan had no drafts.
    pub created_memory_ids: Vec<MemoryId>,
    /// Supersession links actually applied, positional references resolved to
    /// concrete IDs.
    pub superseded_pairs: Vec<ResolvedSupersession>,
    /// Memories whose consolidation-cycle counter was bumped. Deduplicated,
    /// first occurrence order.
    pub sleep_cycle_incremented_ids: Vec<MemoryId>,
    /// Wall-clock time spent applying the plan.
    pub duration_ms: u64,
    /// Plan notes plus partial-failure and slow-execution notices, in order
    /// of appearance.
    pub notes: Vec<String>,
}

impl ReconsolidationReport {
    /// Whether any step was downgraded to a partial-execution note.
    pub fn is_partial(&self) -> bool {
        self.notes.iter().any(|n| n.starts_with("Partial execution"))
    }
}

/// A supersession pair with its replacement resolved to a concrete ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSupersession {
    /// The memory that was replaced.
    pub source_id: MemoryId,
    /// The memory that replaced it.
    pub superseded_by: MemoryId,
}
