//! eWorkbench change list
//!
//! Loads the change history of a tracked entity, classifies each changed
//! field and renders field diffs on demand:
//! - Fetches history and the metadata catalog through a [`HistorySource`]
//! - Classifies records with [`ewb_classify`]
//! - Diffs snapshots with [`ewb_diff`] and resolves referenced names
//! - Keeps list and expansion state in a [`ChangeListView`]
//!
//! # Example
//!
//! ```rust,ignore
//! use ewb_history::{ChangeHistory, ChangeListView, EntityRef, HistoryConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HistoryConfig::load("ewb-history.toml")?;
//! let history = ChangeHistory::from_config(&config)?;
//!
//! let mut view = ChangeListView::new();
//! view.load(&history, &EntityRef::new("task", "42")).await?;
//!
//! let resolver = history.resolver();
//! for change in view.with_field_changes() {
//!     for record in &change.records {
//!         println!("{}: {:?}", record.formatted_field_name, record.render(&resolver).await);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod entity;
pub mod error;
pub mod history;
pub mod metadata;
pub mod render;
pub mod resolver;
pub mod rest;
pub mod source;
pub mod text;
pub mod view;

pub use config::HistoryConfig;
pub use entity::{
    EntityRef, MetadataCatalog, MetadataField, ReferenceKind, ReferencedEntity, UNKNOWN_FIELD,
};
pub use error::{ConfigError, HistoryError, HistoryResult};
pub use history::{ChangeHistory, EnrichedChangeRecord, EnrichedChangeSet};
pub use metadata::{diff_metadata, MetadataChange, MetadataEntry};
pub use render::{
    render_record, BoardColumn, ChecklistItem, DirectoryEntry, LabbookElement, RenderedField,
};
pub use resolver::{ReferenceResolver, ResolvedReference};
pub use rest::RestHistorySource;
pub use source::HistorySource;
pub use view::{ChangeListView, ExpansionState};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for loading and rendering change lists
    pub use crate::{
        ChangeHistory, ChangeListView, EntityRef, HistoryConfig, HistoryError, HistorySource,
        ReferenceResolver, RenderedField,
    };
    pub use ewb_classify::FieldKind;
    pub use ewb_snapshot::{ChangeRecord, ChangeSet, ChangeSetId};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
