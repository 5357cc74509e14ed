//! Per-field rendering of change records
//!
//! Each renderer parses both snapshots, diffs them with the strategy of its
//! field kind and produces a [`RenderedField`]. Rendering a record never
//! fails; a snapshot that does not parse becomes
//! [`RenderedField::Unavailable`] and the rest of the change set is
//! unaffected.

use crate::entity::{MetadataCatalog, ReferenceKind};
use crate::metadata::{diff_metadata, MetadataChange};
use crate::resolver::{ReferenceResolver, ResolvedReference};
use crate::text::{file_name, format_date_time, format_file_size, strip_html};
use ewb_classify::{choice_label, FieldKind, RendererHint};
use ewb_diff::{diff_form_data, DiffResult, FieldDiffer, FormDataChange};
use ewb_snapshot::{
    parse_entries, parse_form_data, parse_scalar, ChangeRecord, FieldSnapshotEntry, SnapshotError,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Item of a task checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Item text
    pub title: String,
    /// Ticked off
    pub checked: bool,
}

impl From<&FieldSnapshotEntry> for ChecklistItem {
    fn from(entry: &FieldSnapshotEntry) -> Self {
        Self {
            title: entry.field_str("title").unwrap_or_default(),
            checked: entry.field_bool("checked"),
        }
    }
}

/// Column of a task board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardColumn {
    /// Column title
    pub title: String,
    /// Display color
    pub color: Option<String>,
    /// Position on the board
    pub ordering: Option<String>,
}

impl From<&FieldSnapshotEntry> for BoardColumn {
    fn from(entry: &FieldSnapshotEntry) -> Self {
        Self {
            title: entry.field_str("title").unwrap_or_default(),
            color: entry.field_str("color"),
            ordering: entry.field_str("ordering"),
        }
    }
}

/// Directory of a storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    /// Directory name
    pub name: String,
    /// Parent directory pk
    pub parent: Option<String>,
    /// Root of the storage
    pub is_virtual_root: bool,
}

impl From<&FieldSnapshotEntry> for DirectoryEntry {
    fn from(entry: &FieldSnapshotEntry) -> Self {
        Self {
            name: entry.field_str("name").unwrap_or_default(),
            parent: entry.field_str("directory"),
            is_virtual_root: entry.field_bool("is_virtual_root"),
        }
    }
}

/// Element placed on a labbook grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabbookElement {
    /// Id of the placed object
    pub child_object_id: String,
    /// Grid column
    pub position_x: Option<String>,
    /// Grid row
    pub position_y: Option<String>,
    /// Width in grid cells
    pub width: Option<String>,
    /// Height in grid cells
    pub height: Option<String>,
}

impl From<&FieldSnapshotEntry> for LabbookElement {
    fn from(entry: &FieldSnapshotEntry) -> Self {
        Self {
            child_object_id: entry.field_str("child_object_id").unwrap_or_default(),
            position_x: entry.field_str("position_x"),
            position_y: entry.field_str("position_y"),
            width: entry.field_str("width"),
            height: entry.field_str("height"),
        }
    }
}

/// Displayable form of one changed field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RenderedField {
    /// Rich text reduced to plain text
    Html {
        /// Previous text
        old_text: Option<String>,
        /// New text
        new_text: Option<String>,
    },
    /// Checklist items removed and added
    Checklist(DiffResult<ChecklistItem>),
    /// Board columns removed and added
    TaskBoardColumns(DiffResult<BoardColumn>),
    /// Directories removed and added
    DirectoryStructure(DiffResult<DirectoryEntry>),
    /// Labbook elements removed and added
    LabbookChildElements(DiffResult<LabbookElement>),
    /// Referenced entities removed and added
    References {
        /// Kind of entity
        kind: ReferenceKind,
        /// Added entities
        added: Vec<ResolvedReference>,
        /// Removed entities
        removed: Vec<ResolvedReference>,
    },
    /// Changed form answers
    FormData(Vec<FormDataChange>),
    /// Metadata entries removed and added
    Metadata(MetadataChange),
    /// Old and new value as text
    Scalar {
        /// Previous value
        old: Option<String>,
        /// New value
        new: Option<String>,
    },
    /// Value could not be rendered
    Unavailable {
        /// Field that failed
        field_name: String,
        /// Failure description
        reason: String,
    },
}

impl RenderedField {
    /// Check for a failed render
    #[inline]
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Placeholder for a record that failed to render
    #[must_use]
    pub fn unavailable(record: &ChangeRecord, reason: impl ToString) -> Self {
        Self::Unavailable {
            field_name: record.field_name.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Equality strategy for collection kinds
fn differ_for(kind: FieldKind) -> FieldDiffer {
    match kind.renderer_hint() {
        RendererHint::ReferenceSet | RendererHint::Precomputed => FieldDiffer::ByPk,
        _ => FieldDiffer::ByValue,
    }
}

fn diff_entries(
    kind: FieldKind,
    record: &ChangeRecord,
) -> Result<DiffResult<FieldSnapshotEntry>, SnapshotError> {
    let old = parse_entries(record.old_raw())?;
    let new = parse_entries(record.new_raw())?;
    Ok(differ_for(kind).diff(&old, &new))
}

fn items<T>(kind: FieldKind, record: &ChangeRecord) -> Result<DiffResult<T>, SnapshotError>
where
    T: for<'a> From<&'a FieldSnapshotEntry>,
{
    Ok(diff_entries(kind, record)?.map(|entry| T::from(&entry)))
}

fn scalar_with(record: &ChangeRecord, f: impl Fn(&str) -> String) -> RenderedField {
    RenderedField::Scalar {
        old: parse_scalar(record.old_raw()).map(|v| f(&v)),
        new: parse_scalar(record.new_raw()).map(|v| f(&v)),
    }
}

async fn references(
    kind: FieldKind,
    reference: ReferenceKind,
    record: &ChangeRecord,
    resolver: &ReferenceResolver,
) -> Result<RenderedField, SnapshotError> {
    let diff = diff_entries(kind, record)?;
    let (removed, added) = futures::join!(
        resolver.resolve_all(reference, diff.only_in_old.iter().map(|e| e.pk.as_str())),
        resolver.resolve_all(reference, diff.only_in_new.iter().map(|e| e.pk.as_str())),
    );
    Ok(RenderedField::References {
        kind: reference,
        added,
        removed,
    })
}

async fn resolved_scalar(
    reference: ReferenceKind,
    record: &ChangeRecord,
    resolver: &ReferenceResolver,
) -> RenderedField {
    let (old, new) = futures::join!(
        resolve_name(reference, record.old_raw(), resolver),
        resolve_name(reference, record.new_raw(), resolver),
    );
    RenderedField::Scalar { old, new }
}

async fn resolve_name(
    reference: ReferenceKind,
    raw: Option<&str>,
    resolver: &ReferenceResolver,
) -> Option<String> {
    let pk = parse_scalar(raw)?;
    Some(resolver.resolve(reference, &pk).await.display_name)
}

async fn try_render(
    kind: FieldKind,
    record: &ChangeRecord,
    resolver: &ReferenceResolver,
) -> Result<RenderedField, SnapshotError> {
    let rendered = match kind {
        FieldKind::Html => RenderedField::Html {
            old_text: parse_scalar(record.old_raw()).map(|v| strip_html(&v)),
            new_text: parse_scalar(record.new_raw()).map(|v| strip_html(&v)),
        },
        FieldKind::Checklist => RenderedField::Checklist(items(kind, record)?),
        FieldKind::TaskBoardColumns => RenderedField::TaskBoardColumns(items(kind, record)?),
        FieldKind::DirectoryStructure => RenderedField::DirectoryStructure(items(kind, record)?),
        FieldKind::LabbookChildElements => {
            RenderedField::LabbookChildElements(items(kind, record)?)
        }
        FieldKind::Labels => references(kind, ReferenceKind::Label, record, resolver).await?,
        FieldKind::UserList => references(kind, ReferenceKind::User, record, resolver).await?,
        FieldKind::ProjectList => {
            references(kind, ReferenceKind::Project, record, resolver).await?
        }
        FieldKind::ResourceUsageSettingUserGroups => {
            references(kind, ReferenceKind::UserGroup, record, resolver).await?
        }
        FieldKind::DmpFormData => {
            let old = parse_form_data(record.old_raw())?;
            let new = parse_form_data(record.new_raw())?;
            RenderedField::FormData(diff_form_data(&old, &new))
        }
        FieldKind::Metadata => {
            RenderedField::Metadata(diff_metadata(record, &MetadataCatalog::default())?)
        }
        FieldKind::DmpForm => resolved_scalar(ReferenceKind::DmpForm, record, resolver).await,
        FieldKind::DateTime => scalar_with(record, format_date_time),
        FieldKind::FileSize => scalar_with(record, format_file_size),
        FieldKind::TermsOfUsePdf => scalar_with(record, file_name),
        FieldKind::DmpStatus
        | FieldKind::TaskState
        | FieldKind::TaskPriority
        | FieldKind::ResourceType
        | FieldKind::ResourceUsageSetting => scalar_with(record, |code| {
            choice_label(kind, code).map_or_else(|| code.to_string(), str::to_string)
        }),
        FieldKind::Generic => scalar_with(record, str::to_string),
    };
    Ok(rendered)
}

/// Render one change record
///
/// Never fails; parse errors are logged and reported as
/// [`RenderedField::Unavailable`].
pub async fn render_record(
    kind: FieldKind,
    record: &ChangeRecord,
    resolver: &ReferenceResolver,
) -> RenderedField {
    match try_render(kind, record, resolver).await {
        Ok(rendered) => rendered,
        Err(e) => {
            warn!(field = %record.field_name, %kind, error = %e, "Failed to render change record");
            RenderedField::unavailable(record, e)
        }
    }
}
