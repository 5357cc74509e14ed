//! Change list orchestrator
//!
//! Loads the history of one entity, classifies every record and precomputes
//! the metadata diffs. Everything else is rendered lazily through
//! [`EnrichedChangeRecord::render`].

use crate::config::HistoryConfig;
use crate::entity::{EntityRef, MetadataCatalog};
use crate::error::HistoryResult;
use crate::metadata::diff_metadata;
use crate::render::{render_record, RenderedField};
use crate::resolver::ReferenceResolver;
use crate::rest::RestHistorySource;
use crate::source::HistorySource;
use ewb_classify::{classify, format_field_name, FieldKind};
use ewb_snapshot::{ChangeRecord, ChangeSet, ChangeSetId};
use futures::future::join_all;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Classified change record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedChangeRecord {
    /// Record as received
    pub record: ChangeRecord,
    /// Renderer category
    pub kind: FieldKind,
    /// Field name for display
    pub formatted_field_name: String,
    /// Result computed during load, if any
    pub precomputed: Option<RenderedField>,
}

impl EnrichedChangeRecord {
    /// Classify a record for the given content type model
    #[must_use]
    pub fn new(model: &str, record: ChangeRecord) -> Self {
        Self {
            kind: classify(model, &record.field_name),
            formatted_field_name: format_field_name(&record.field_name),
            record,
            precomputed: None,
        }
    }

    /// Render the diff of this field
    pub async fn render(&self, resolver: &ReferenceResolver) -> RenderedField {
        match &self.precomputed {
            Some(rendered) => rendered.clone(),
            None => render_record(self.kind, &self.record, resolver).await,
        }
    }
}

/// Change set with classified records
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedChangeSet {
    /// Change set as received
    pub change_set: ChangeSet,
    /// Classified records, in backend order
    pub records: Vec<EnrichedChangeRecord>,
}

impl EnrichedChangeSet {
    /// Change set id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ChangeSetId {
        &self.change_set.id
    }

    /// Display name of the acting user
    #[must_use]
    pub fn author(&self) -> String {
        self.change_set.author()
    }

    /// Trash and restore events are listed without field diffs
    #[inline]
    #[must_use]
    pub fn is_trashed_or_restored(&self) -> bool {
        self.change_set.change_type.is_trashed_or_restored()
    }

    /// Render every record concurrently, in record order
    pub async fn render_all(&self, resolver: &ReferenceResolver) -> Vec<RenderedField> {
        join_all(self.records.iter().map(|r| r.render(resolver))).await
    }
}

fn enrich(
    change_set: ChangeSet,
    fallback_model: &str,
    catalog: &MetadataCatalog,
) -> EnrichedChangeSet {
    let model = change_set.model().unwrap_or(fallback_model).to_string();
    let records = change_set
        .change_records
        .iter()
        .cloned()
        .map(|record| {
            let mut enriched = EnrichedChangeRecord::new(&model, record);
            if enriched.kind == FieldKind::Metadata {
                enriched.precomputed = Some(match diff_metadata(&enriched.record, catalog) {
                    Ok(change) => RenderedField::Metadata(change),
                    Err(e) => {
                        warn!(change_set = %change_set.id, error = %e, "Failed to diff metadata");
                        RenderedField::unavailable(&enriched.record, e)
                    }
                });
            }
            enriched
        })
        .collect();

    EnrichedChangeSet {
        change_set,
        records,
    }
}

/// Loads and enriches the change history of tracked entities
#[derive(Clone)]
pub struct ChangeHistory {
    source: Arc<dyn HistorySource>,
    lookup_capacity: u64,
}

impl ChangeHistory {
    /// Create orchestrator over any source
    #[must_use]
    pub fn new(source: Arc<dyn HistorySource>) -> Self {
        Self {
            source,
            lookup_capacity: HistoryConfig::default().lookup_cache_capacity,
        }
    }

    /// Create orchestrator backed by the REST API
    ///
    /// # Errors
    /// Returns error if the configuration is invalid
    pub fn from_config(config: &HistoryConfig) -> HistoryResult<Self> {
        let source = RestHistorySource::new(config.clone())?;
        Ok(Self {
            source: Arc::new(source),
            lookup_capacity: config.lookup_cache_capacity,
        })
    }

    /// Fresh resolver for one render pass
    #[must_use]
    pub fn resolver(&self) -> ReferenceResolver {
        ReferenceResolver::new(Arc::clone(&self.source), self.lookup_capacity)
    }

    /// Load the change history of an entity
    ///
    /// The metadata catalog is fetched once per call and only used to name
    /// the fields of metadata diffs.
    ///
    /// # Errors
    /// Returns error if the catalog or the history cannot be fetched
    pub async fn load_changes(&self, entity: &EntityRef) -> HistoryResult<Vec<EnrichedChangeSet>> {
        info!("Loading change history of {}", entity);

        let fetched = futures::try_join!(
            self.source.fetch_metadata_fields(),
            self.source.fetch_history(entity),
        );
        let (fields, change_sets) = match fetched {
            Ok(fetched) => fetched,
            Err(e) => {
                error!("Loading change history of {} failed: {}", entity, e);
                return Err(e);
            }
        };

        let catalog = MetadataCatalog::new(fields);
        debug!("Fetched {} metadata fields", catalog.len());
        info!("Fetched {} change sets for {}", change_sets.len(), entity);

        Ok(change_sets
            .into_iter()
            .map(|change_set| enrich(change_set, &entity.model, &catalog))
            .collect())
    }
}

impl fmt::Debug for ChangeHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeHistory")
            .field("lookup_capacity", &self.lookup_capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ewb_snapshot::{ChangeType, ObjectType};

    fn change_set(model: Option<&str>, records: Vec<ChangeRecord>) -> ChangeSet {
        ChangeSet {
            id: ChangeSetId::new("c1"),
            changed_at: Utc.with_ymd_and_hms(2021, 3, 4, 10, 0, 0).unwrap(),
            changed_by: None,
            object_type: model.map(|m| ObjectType {
                id: None,
                app_label: String::new(),
                model: m.to_string(),
            }),
            object_uuid: None,
            change_type: ChangeType::Update,
            change_records: records,
        }
    }

    #[test]
    fn object_type_takes_precedence() {
        let set = change_set(
            Some("task"),
            vec![ChangeRecord::new("state", None, Some("DONE".to_string()))],
        );
        let enriched = enrich(set, "meeting", &MetadataCatalog::default());
        assert_eq!(enriched.records[0].kind, FieldKind::TaskState);
    }

    #[test]
    fn fallback_model_without_object_type() {
        let set = change_set(None, vec![ChangeRecord::new("status", None, None)]);
        let enriched = enrich(set, "dmp", &MetadataCatalog::default());
        assert_eq!(enriched.records[0].kind, FieldKind::DmpStatus);
        assert_eq!(enriched.records[0].formatted_field_name, "status");
    }

    #[test]
    fn only_metadata_is_precomputed() {
        let set = change_set(
            Some("task"),
            vec![
                ChangeRecord::new("due_date", None, None),
                ChangeRecord::new("metadata", None, Some("[]".to_string())),
                ChangeRecord::new("metadata", Some("not json".to_string()), None),
            ],
        );
        let enriched = enrich(set, "task", &MetadataCatalog::default());

        assert!(enriched.records[0].precomputed.is_none());
        assert_eq!(
            enriched.records[1].precomputed,
            Some(RenderedField::Metadata(Default::default()))
        );
        assert!(enriched.records[2]
            .precomputed
            .as_ref()
            .is_some_and(RenderedField::is_unavailable));
    }

    #[test]
    fn trashed_change_set() {
        let mut set = change_set(None, Vec::new());
        set.change_type = ChangeType::SoftDelete;
        let enriched = enrich(set, "note", &MetadataCatalog::default());
        assert!(enriched.is_trashed_or_restored());
        assert_eq!(enriched.id().as_str(), "c1");
    }
}
