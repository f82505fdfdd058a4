use serde::{Deserialize, Serialize};

use crate::models::MemoryId;

/// The memory type a draft declares for its derived memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryType {
    Episodic,
    Semantic,
    Procedural,
    Insight,
    Decision,
    Reference,
    Preference,
}

impl MemoryType {
    /// Total number of memory types.
    pub const COUNT: usize = 7;

    /// All variants for iteration.
    pub const ALL: [MemoryType; 7] = [
        Self::Episodic,
        Self::Semantic,
        Self::Procedural,
        Self::Insight,
        Self::Decision,
        Self::Reference,
        Self::Preference,
    ];
}

/// How a memory came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    /// Captured directly from agent interaction.
    Captured,
    /// Synthesized from prior memories during reconsolidation.
    Derived,
}

/// Which actor wrote a memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemorySource {
    System,
    User,
    Agent,
}

/// Relationship edge kinds a draft may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Supersedes,
    DerivedFrom,
    Related,
    Contradicts,
}

/// A relationship edge declared on a derived-memory draft.
///
/// Carried through the plan but not persisted by the executor; a future
/// repository operation may consume these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRelationship {
    /// The memory on the far end of the edge.
    pub target_id: MemoryId,
    /// Edge kind.
    pub relationship_type: RelationshipType,
}
