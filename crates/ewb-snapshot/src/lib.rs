//! eWorkbench change snapshots
//!
//! Data model for the change history of tracked entities and the parser that
//! turns serialized `old_value` / `new_value` blobs into typed entries.
//!
//! # Core Concepts
//!
//! - [`ChangeSet`]: One historical event (update, trash, restore, insert)
//! - [`ChangeRecord`]: Before/after state of a single field within a change set
//! - [`FieldSnapshotEntry`]: One `{model, pk, fields}` item of a collection field
//!
//! # Example
//!
//! ```rust
//! use ewb_snapshot::parse_entries;
//!
//! let raw = r#"[{"model": "label", "pk": "7", "fields": {"name": "urgent"}}]"#;
//! let entries = parse_entries(Some(raw)).unwrap();
//! assert_eq!(entries[0].pk, "7");
//! assert!(parse_entries(Some("")).unwrap().is_empty());
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod model;
pub mod parser;

pub use error::SnapshotError;
pub use model::{
    deserialize_key, is_trashed_or_restored, ChangeRecord, ChangeSet, ChangeSetId, ChangeType,
    FieldSnapshotEntry, FormDataEntry, ObjectType, UserProfile, UserRef, UNKNOWN_USER,
};
pub use parser::{parse_entries, parse_form_data, parse_scalar};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
