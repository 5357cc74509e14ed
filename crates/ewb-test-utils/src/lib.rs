//! Testing utilities for the change-history workspace
//!
//! Shared fixtures and a scripted in-memory [`HistorySource`].

#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use ewb_history::{
    EntityRef, HistoryError, HistoryResult, HistorySource, MetadataField, ReferenceKind,
    ReferencedEntity,
};
use ewb_snapshot::{
    ChangeRecord, ChangeSet, ChangeSetId, ChangeType, FieldSnapshotEntry, ObjectType,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a fmt subscriber honoring `RUST_LOG`; safe to call from every test
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Snapshot entry from a JSON object of fields
pub fn entry(model: &str, pk: &str, fields: Value) -> FieldSnapshotEntry {
    let fields = match fields {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    FieldSnapshotEntry::new(model, pk, fields)
}

/// Entries encoded the way the backend stores them in a change record
pub fn encode_entries(entries: &[FieldSnapshotEntry]) -> String {
    serde_json::to_string(entries).unwrap()
}

/// Label entry with a name
pub fn label(pk: &str, name: &str) -> FieldSnapshotEntry {
    entry("label", pk, serde_json::json!({ "name": name }))
}

/// Update change set of a model with the given records
pub fn change_set(id: &str, model: &str, records: Vec<ChangeRecord>) -> ChangeSet {
    ChangeSet {
        id: ChangeSetId::new(id),
        changed_at: Utc.with_ymd_and_hms(2021, 3, 4, 10, 0, 0).unwrap(),
        changed_by: None,
        object_type: Some(ObjectType {
            id: None,
            app_label: "shared_elements".to_string(),
            model: model.to_string(),
        }),
        object_uuid: None,
        change_type: ChangeType::Update,
        change_records: records,
    }
}

/// Metadata catalog entry
pub fn metadata_field(pk: &str, name: &str) -> MetadataField {
    MetadataField {
        pk: pk.to_string(),
        name: name.to_string(),
        base_type: "text".to_string(),
        description: None,
    }
}

/// In-memory history source with scripted responses
#[derive(Debug, Default)]
pub struct FakeHistorySource {
    history: Vec<ChangeSet>,
    catalog: Vec<MetadataField>,
    references: HashMap<(ReferenceKind, String), String>,
    failing: bool,
    history_calls: AtomicUsize,
    catalog_calls: AtomicUsize,
    reference_calls: AtomicUsize,
}

impl FakeHistorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, history: Vec<ChangeSet>) -> Self {
        self.history = history;
        self
    }

    pub fn with_catalog(mut self, catalog: Vec<MetadataField>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_reference(mut self, kind: ReferenceKind, pk: &str, name: &str) -> Self {
        self.references.insert((kind, pk.to_string()), name.to_string());
        self
    }

    /// Every call fails with [`HistoryError::Unavailable`]
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }

    pub fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }

    pub fn reference_calls(&self) -> usize {
        self.reference_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> HistoryResult<()> {
        if self.failing {
            Err(HistoryError::Unavailable("scripted failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl HistorySource for FakeHistorySource {
    async fn fetch_history(&self, _entity: &EntityRef) -> HistoryResult<Vec<ChangeSet>> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.history.clone())
    }

    async fn fetch_metadata_fields(&self) -> HistoryResult<Vec<MetadataField>> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.catalog.clone())
    }

    async fn resolve_reference(
        &self,
        kind: ReferenceKind,
        pk: &str,
    ) -> HistoryResult<Option<ReferencedEntity>> {
        self.reference_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .references
            .get(&(kind, pk.to_string()))
            .map(|name| ReferencedEntity {
                kind,
                pk: pk.to_string(),
                display_name: name.clone(),
            }))
    }
}
