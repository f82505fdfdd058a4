//! Plan, report, and record models exchanged with the repository.

mod creation_record;
mod ids;
mod reconsolidation_plan;
mod reconsolidation_report;

pub use creation_record::{CreationRecord, DerivedMemoryMetadata};
pub use ids::{MemoryId, ScopeId};
pub use reconsolidation_plan::{
    DerivedMemoryDraft, ReconsolidationPlan, SupersededBy, SupersessionPair,
};
pub use reconsolidation_report::{ReconsolidationReport, ResolvedSupersession};
