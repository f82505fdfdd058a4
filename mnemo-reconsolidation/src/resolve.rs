//! Supersession reference resolution and target dedup.

use std::collections::HashSet;

use mnemo_core::errors::ReconsolidationError;
use mnemo_core::models::{MemoryId, ResolvedSupersession, SupersededBy, SupersessionPair};

/// Resolve positional draft references against the created-ID arena.
///
/// `created` is positionally aligned with the plan's drafts, so `Draft(k)`
/// resolves to `created[k]`. Runs as a single pass before any supersession
/// write happens.
pub(crate) fn resolve_pairs(
    pairs: &[SupersessionPair],
    created: &[MemoryId],
) -> Result<Vec<ResolvedSupersession>, ReconsolidationError> {
    pairs
        .iter()
        .map(|pair| {
            let superseded_by = match &pair.superseded_by {
                SupersededBy::Existing(id) => id.clone(),
                SupersededBy::Draft(index) => created.get(*index).cloned().ok_or(
                    ReconsolidationError::DraftIndexOutOfRange {
                        index: *index,
                        created: created.len(),
                    },
                )?,
            };
            Ok(ResolvedSupersession {
                source_id: pair.source_id.clone(),
                superseded_by,
            })
        })
        .collect()
}

/// Union of `targets` and `created`, deduplicated, first occurrence order.
pub(crate) fn dedupe_union(targets: &[MemoryId], created: &[MemoryId]) -> Vec<MemoryId> {
    let mut seen = HashSet::new();
    targets
        .iter()
        .chain(created.iter())
        .filter(|id| seen.insert((*id).clone()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn id(s: &str) -> MemoryId {
        MemoryId::from(s)
    }

    #[test]
    fn existing_references_pass_through() {
        let pairs = [SupersessionPair {
            source_id: id("old-1"),
            superseded_by: SupersededBy::Existing(id("new-1")),
        }];
        let resolved = resolve_pairs(&pairs, &[]).unwrap();
        assert_eq!(resolved[0].superseded_by, id("new-1"));
    }

    #[test]
    fn draft_references_resolve_to_created_ids() {
        let created = [id("mem-0"), id("mem-1")];
        let pairs = [
            SupersessionPair {
                source_id: id("old-a"),
                superseded_by: SupersededBy::Draft(1),
            },
            SupersessionPair {
                source_id: id("old-b"),
                superseded_by: SupersededBy::Draft(0),
            },
        ];
        let resolved = resolve_pairs(&pairs, &created).unwrap();
        assert_eq!(resolved[0].superseded_by, id("mem-1"));
        assert_eq!(resolved[1].superseded_by, id("mem-0"));
    }

    #[test]
    fn out_of_range_draft_reference_is_an_error() {
        let err = resolve_pairs(
            &[SupersessionPair {
                source_id: id("old"),
                superseded_by: SupersededBy::Draft(3),
            }],
            &[id("mem-0")],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ReconsolidationError::DraftIndexOutOfRange { index: 3, created: 1 }
        ));
    }

    #[test]
    fn dedupe_union_keeps_first_occurrence_order() {
        let targets = [id("a"), id("b"), id("a")];
        let created = [id("b"), id("c")];
        assert_eq!(
            dedupe_union(&targets, &created),
            vec![id("a"), id("b"), id("c")]
        );
    }

    #[test]
    fn dedupe_union_of_nothing_is_empty() {
        assert!(dedupe_union(&[], &[]).is_empty());
    }

    proptest! {
        /// Every in-range draft reference resolves to the ID at that draft
        /// position, never to the raw index.
        #[test]
        fn draft_reference_resolves_positionally(created_len in 1usize..32, index in 0usize..32) {
            let created: Vec<MemoryId> =
                (0..created_len).map(|i| MemoryId::from(format!("mem-{i}"))).collect();
            let pairs = [SupersessionPair {
                source_id: MemoryId::from("src"),
                superseded_by: SupersededBy::Draft(index),
            }];
            let result = resolve_pairs(&pairs, &created);
            if index < created_len {
                prop_assert_eq!(result.unwrap()[0].superseded_by.clone(), created[index].clone());
            } else {
                prop_assert!(result.is_err());
            }
        }

        /// The union is duplicate-free and contains exactly the set union.
        #[test]
        fn dedupe_union_is_a_set_union(
            targets in proptest::collection::vec(0u8..16, 0..24),
            created in proptest::collection::vec(0u8..16, 0..24),
        ) {
            let to_ids = |ns: &[u8]| -> Vec<MemoryId> {
                ns.iter().map(|n| MemoryId::from(format!("m-{n}"))).collect()
            };
            let union = dedupe_union(&to_ids(&targets), &to_ids(&created));

            let mut seen = std::collections::HashSet::new();
            for idm in &union {
                prop_assert!(seen.insert(idm.clone()), "duplicate {idm} in union");
            }
            let expected: std::collections::HashSet<MemoryId> =
                to_ids(&targets).into_iter().chain(to_ids(&created)).collect();
            prop_assert_eq!(seen, expected);
        }
    }
}
