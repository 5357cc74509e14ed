//! Backend seam for change history data

use crate::entity::{EntityRef, MetadataField, ReferenceKind, ReferencedEntity};
use crate::error::HistoryResult;
use async_trait::async_trait;
use ewb_snapshot::ChangeSet;

/// Provider of change sets, the metadata catalog and referenced entities
///
/// Implementations must be shareable across tasks; the orchestrator holds
/// them behind an `Arc`.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// First page of the entity's change history, newest first
    ///
    /// # Errors
    /// Returns error if the backend cannot be reached or answers garbage
    async fn fetch_history(&self, entity: &EntityRef) -> HistoryResult<Vec<ChangeSet>>;

    /// Catalog of metadata field definitions
    ///
    /// # Errors
    /// Returns error if the backend cannot be reached or answers garbage
    async fn fetch_metadata_fields(&self) -> HistoryResult<Vec<MetadataField>>;

    /// Look up a referenced entity; `Ok(None)` if it does not exist
    ///
    /// # Errors
    /// Returns error if the backend cannot be reached or answers garbage
    async fn resolve_reference(
        &self,
        kind: ReferenceKind,
        pk: &str,
    ) -> HistoryResult<Option<ReferencedEntity>>;
}
