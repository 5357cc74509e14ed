//! Tracked entities, referenced entities and the metadata field catalog

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Placeholder for metadata fields missing from the catalog
pub const UNKNOWN_FIELD: &str = "unknown field";

/// Entity whose history is loaded
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// Content type model (`task`, `dmp`, ...)
    pub model: String,
    /// Entity primary key
    pub pk: String,
}

impl EntityRef {
    /// Create entity reference
    #[inline]
    #[must_use]
    pub fn new(model: impl Into<String>, pk: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            pk: pk.into(),
        }
    }

    /// REST collection of the model
    #[must_use]
    pub fn collection(&self) -> String {
        match self.model.as_str() {
            "task" => "tasks".to_string(),
            "meeting" => "meetings".to_string(),
            "contact" => "contacts".to_string(),
            "note" => "notes".to_string(),
            "file" => "files".to_string(),
            "drive" => "drives".to_string(),
            "dmp" => "dmps".to_string(),
            "resource" => "resources".to_string(),
            "labbook" => "labbooks".to_string(),
            "kanbanboard" => "kanbanboards".to_string(),
            "project" => "projects".to_string(),
            "picture" => "pictures".to_string(),
            other => format!("{other}s"),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.model, self.pk)
    }
}

/// Kinds of entities referenced from change records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceKind {
    /// Portal user
    User,
    /// Project
    Project,
    /// Label
    Label,
    /// DMP form
    DmpForm,
    /// User group
    UserGroup,
}

impl ReferenceKind {
    /// REST collection
    #[must_use]
    pub fn collection(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Project => "projects",
            Self::Label => "labels",
            Self::DmpForm => "dmpforms",
            Self::UserGroup => "groups",
        }
    }

    /// Text shown when the entity cannot be resolved
    #[must_use]
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::User => "unknown user",
            Self::Project => "unknown project",
            Self::Label => "unknown label",
            Self::DmpForm => "unknown form",
            Self::UserGroup => "unknown group",
        }
    }
}

/// Resolved entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencedEntity {
    /// Kind of entity
    pub kind: ReferenceKind,
    /// Primary key
    pub pk: String,
    /// Name to display
    pub display_name: String,
}

impl ReferencedEntity {
    /// Build from a REST detail payload
    ///
    /// Users prefer their profile name; everything else takes the first of
    /// `display`, `name`, `title`, `username`.
    #[must_use]
    pub fn from_json(kind: ReferenceKind, pk: impl Into<String>, body: &Value) -> Option<Self> {
        let profile_name = || {
            let profile = body.get("userprofile")?;
            let first = profile.get("first_name").and_then(Value::as_str).unwrap_or("");
            let last = profile.get("last_name").and_then(Value::as_str).unwrap_or("");
            let full = format!("{} {}", first.trim(), last.trim()).trim().to_string();
            (!full.is_empty()).then_some(full)
        };
        let plain_name = || {
            ["display", "name", "title", "username"]
                .iter()
                .filter_map(|key| body.get(*key).and_then(Value::as_str))
                .map(str::trim)
                .find(|s| !s.is_empty())
                .map(str::to_string)
        };

        let display_name = match kind {
            ReferenceKind::User => profile_name().or_else(plain_name),
            _ => plain_name(),
        }?;

        Some(Self {
            kind,
            pk: pk.into(),
            display_name,
        })
    }
}

/// Entry of the metadata field catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    /// Field id
    #[serde(deserialize_with = "ewb_snapshot::deserialize_key")]
    pub pk: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Value type (`whole_number`, `text`, `selection`, ...)
    #[serde(default)]
    pub base_type: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
}

/// Metadata fields by pk, built once per load
#[derive(Debug, Clone, Default)]
pub struct MetadataCatalog {
    fields: HashMap<String, MetadataField>,
}

impl MetadataCatalog {
    /// Build catalog from fetched fields
    #[must_use]
    pub fn new(fields: Vec<MetadataField>) -> Self {
        Self {
            fields: fields.into_iter().map(|f| (f.pk.clone(), f)).collect(),
        }
    }

    /// Look up a field
    #[inline]
    #[must_use]
    pub fn get(&self, pk: &str) -> Option<&MetadataField> {
        self.fields.get(pk)
    }

    /// Display name of a field with placeholder fallback
    #[must_use]
    pub fn field_name(&self, pk: &str) -> String {
        self.get(pk)
            .map(|f| f.name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_FIELD)
            .to_string()
    }

    /// Number of fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check for empty catalog
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
