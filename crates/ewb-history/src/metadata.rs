//! Metadata changes, diffed while the change list loads

use crate::entity::MetadataCatalog;
use ewb_diff::{diff_by_pk, DiffResult};
use ewb_snapshot::{parse_entries, ChangeRecord, FieldSnapshotEntry, SnapshotError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One metadata value with its field name resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataEntry {
    /// Entry primary key
    pub pk: String,
    /// Catalog field id
    pub field_pk: String,
    /// Catalog field name or placeholder
    pub field_name: String,
    /// Value as text
    pub value: String,
}

impl MetadataEntry {
    fn from_entry(entry: &FieldSnapshotEntry, catalog: &MetadataCatalog) -> Self {
        let field_pk = entry.field_str("field").unwrap_or_default();
        Self {
            pk: entry.pk.clone(),
            field_name: catalog.field_name(&field_pk),
            field_pk,
            value: entry.field("values").map(render_value).unwrap_or_default(),
        }
    }
}

/// Removed and added metadata entries
pub type MetadataChange = DiffResult<MetadataEntry>;

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Object(map) if map.len() == 1 && map.contains_key("value") => {
            map.get("value").map(render_value).unwrap_or_default()
        }
        other => other.to_string(),
    }
}

/// Diff metadata snapshots by pk and name their fields from the catalog
///
/// # Errors
/// Returns error if either snapshot does not parse
pub fn diff_metadata(
    record: &ChangeRecord,
    catalog: &MetadataCatalog,
) -> Result<MetadataChange, SnapshotError> {
    let old = parse_entries(record.old_raw())?;
    let new = parse_entries(record.new_raw())?;
    Ok(diff_by_pk(&old, &new).map(|entry| MetadataEntry::from_entry(&entry, catalog)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::MetadataField;
    use serde_json::json;

    fn catalog() -> MetadataCatalog {
        MetadataCatalog::new(vec![MetadataField {
            pk: "f1".to_string(),
            name: "Temperature".to_string(),
            base_type: "decimal_number".to_string(),
            description: None,
        }])
    }

    fn snapshot(entries: &Value) -> Option<String> {
        Some(entries.to_string())
    }

    #[test]
    fn added_entry_gets_field_name() {
        let record = ChangeRecord::new(
            "metadata",
            None,
            snapshot(&json!([
                {"model": "metadata", "pk": "m1", "fields": {"field": "f1", "values": {"value": 21.5}}}
            ])),
        );

        let change = diff_metadata(&record, &catalog()).unwrap();
        assert!(change.only_in_old.is_empty());
        assert_eq!(
            change.only_in_new,
            vec![MetadataEntry {
                pk: "m1".to_string(),
                field_pk: "f1".to_string(),
                field_name: "Temperature".to_string(),
                value: "21.5".to_string(),
            }]
        );
    }

    #[test]
    fn unknown_field_placeholder() {
        let record = ChangeRecord::new(
            "metadata",
            snapshot(&json!([
                {"model": "metadata", "pk": "m2", "fields": {"field": "zz", "values": {"answers": [1]}}}
            ])),
            Some("[]".to_string()),
        );

        let change = diff_metadata(&record, &catalog()).unwrap();
        assert_eq!(change.only_in_old[0].field_name, "unknown field");
        assert_eq!(change.only_in_old[0].value, r#"{"answers":[1]}"#);
    }

    #[test]
    fn same_pk_is_unchanged() {
        let old = json!([{"model": "metadata", "pk": "m1", "fields": {"field": "f1", "values": {"value": 1}}}]);
        let new = json!([{"model": "metadata", "pk": "m1", "fields": {"field": "f1", "values": {"value": 2}}}]);
        let record = ChangeRecord::new("metadata", snapshot(&old), snapshot(&new));

        assert!(diff_metadata(&record, &catalog()).unwrap().is_empty());
    }

    #[test]
    fn malformed_snapshot_is_error() {
        let record = ChangeRecord::new("metadata", Some("{".to_string()), None);
        assert!(diff_metadata(&record, &catalog()).is_err());
    }
}
