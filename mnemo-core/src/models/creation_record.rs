use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::memory::{MemoryKind, MemorySource, MemoryType};

use super::ids::MemoryId;
use super::reconsolidation_plan::DerivedMemoryDraft;

/// One record submitted to the repository's bulk-upsert operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreationRecord {
    /// Text to embed and store.
    pub text: String,
    /// Metadata stored alongside the embedding.
    pub metadata: DerivedMemoryMetadata,
}

/// Metadata attached to a derived memory at creation.
///
/// Structural keys are typed fields; draft-supplied metadata rides in `extra`,
/// serde-flattened beside them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedMemoryMetadata {
    /// Declared memory type.
    pub memory_type: MemoryType,
    /// Always [`MemoryKind::Derived`] for reconsolidation output.
    pub kind: MemoryKind,
    /// Source memories the text was synthesized from.
    pub derived_from_ids: Vec<MemoryId>,
    /// Always [`MemorySource::System`] — the executor writes these, not a user.
    pub source: MemorySource,
    /// Draft-supplied metadata.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl CreationRecord {
    /// Build the creation record for a draft.
    ///
    /// Draft `relationships` are not forwarded; the bulk-upsert contract does
    /// not carry them.
    pub fn from_draft(draft: &DerivedMemoryDraft) -> Self {
        Self {
            text: draft.text.clone(),
            metadata: DerivedMemoryMetadata {
                memory_type: draft.memory_type,
                kind: MemoryKind::Derived,
                derived_from_ids: draft.derived_from_ids.clone(),
                source: MemorySource::System,
                extra: draft.metadata.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> DerivedMemoryDraft {
        DerivedMemoryDraft {
            text: "consolidated insight".to_string(),
            memory_type: MemoryType::Insight,
            derived_from_ids: vec![MemoryId::from("m-1"), MemoryId::from("m-2")],
            relationships: Vec::new(),
            metadata: BTreeMap::from([("topic".to_string(), serde_json::json!("rust"))]),
        }
    }

    #[test]
    fn record_marks_output_as_system_derived() {
        let record = CreationRecord::from_draft(&draft());
        assert_eq!(record.metadata.kind, MemoryKind::Derived);
        assert_eq!(record.metadata.source, MemorySource::System);
        assert_eq!(record.metadata.derived_from_ids.len(), 2);
    }

    #[test]
    fn extra_metadata_flattens_into_the_metadata_object() {
        let record = CreationRecord::from_draft(&draft());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["metadata"]["kind"], "derived");
        assert_eq!(json["metadata"]["source"], "system");
        assert_eq!(json["metadata"]["topic"], "rust");
    }
}
