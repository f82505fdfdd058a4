//! The plan vocabulary: what the reasoning layer proposes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::memory::{DraftRelationship, MemoryType};

use super::ids::MemoryId;

/// A proposed reconsolidation, produced by the reasoning layer.
///
/// Immutable once received. Applied as a strict create → supersede →
/// increment-cycles sequence; later steps never run when creation fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconsolidationPlan {
    /// Drafts for the derived memories to create, in creation order.
    pub derived_memories: Vec<DerivedMemoryDraft>,
    /// Supersession links to record once the drafts exist.
    #[serde(default)]
    pub supersession_pairs: Vec<SupersessionPair>,
    /// Memories whose consolidation-cycle counter is bumped regardless of
    /// whether they were superseded.
    #[serde(default)]
    pub sleep_cycle_targets: Vec<MemoryId>,
    /// Free-form explanation from the plan's author.
    #[serde(default)]
    pub notes: Option<String>,
}

impl ReconsolidationPlan {
    /// A plan with only drafts, the common case.
    pub fn from_drafts(derived_memories: Vec<DerivedMemoryDraft>) -> Self {
        Self {
            derived_memories,
            supersession_pairs: Vec::new(),
            sleep_cycle_targets: Vec::new(),
            notes: None,
        }
    }

    /// Whether the plan asks for no work at all.
    pub fn is_empty(&self) -> bool {
        self.derived_memories.is_empty()
            && self.supersession_pairs.is_empty()
            && self.sleep_cycle_targets.is_empty()
    }
}

/// One derived memory to be created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedMemoryDraft {
    /// Text content of the derived memory.
    pub text: String,
    /// Declared memory type.
    pub memory_type: MemoryType,
    /// Source memories this draft was synthesized from.
    #[serde(default)]
    pub derived_from_ids: Vec<MemoryId>,
    /// Relationship edges declared alongside the memory. Not persisted by the
    /// executor; see [`DraftRelationship`].
    #[serde(default)]
    pub relationships: Vec<DraftRelationship>,
    /// Free-form metadata merged into the creation record.
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// A supersession link from a source memory to its replacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupersessionPair {
    /// The memory being replaced.
    pub source_id: MemoryId,
    /// Its replacement.
    pub superseded_by: SupersededBy,
}

/// Replacement reference: either an existing memory, or a draft the same plan
/// will create.
///
/// Untagged so a JSON plan can say `"mem-42"` or `1` directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SupersededBy {
    /// 0-based position into the plan's `derived_memories`.
    Draft(usize),
    /// An already existing memory.
    Existing(MemoryId),
}
