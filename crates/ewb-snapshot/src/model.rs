//! Change history data model
//!
//! Mirrors the payload of the `/history/` endpoints: a change set per
//! mutation, each carrying one [`ChangeRecord`] per touched field.
//! Change sets are read-only on this side; nothing here mutates them.

use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Placeholder for users that cannot be resolved
pub const UNKNOWN_USER: &str = "unknown user";

/// Deserialize a primary key sent as string (UUID) or number
///
/// # Errors
/// Fails for values other than strings, numbers and `null`
pub fn deserialize_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number key, got {other}"
        ))),
    }
}

/// Identifier of a change set
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSetId(#[serde(deserialize_with = "deserialize_key")] pub String);

impl ChangeSetId {
    /// Create id from any string-like value
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as str
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChangeSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChangeSetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Kind of mutation that produced a change set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeType {
    /// Entity created
    #[serde(rename = "I")]
    Insert,
    /// Fields updated
    #[serde(rename = "U")]
    Update,
    /// Entity moved to trash
    #[serde(rename = "S")]
    SoftDelete,
    /// Entity restored from trash
    #[serde(rename = "R")]
    Restore,
}

impl ChangeType {
    /// Single-letter wire code
    #[inline]
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Insert => "I",
            Self::Update => "U",
            Self::SoftDelete => "S",
            Self::Restore => "R",
        }
    }

    /// Trash and restore events carry no meaningful field diff
    #[inline]
    #[must_use]
    pub fn is_trashed_or_restored(self) -> bool {
        matches!(self, Self::SoftDelete | Self::Restore)
    }
}

impl FromStr for ChangeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "I" => Ok(Self::Insert),
            "U" => Ok(Self::Update),
            "S" => Ok(Self::SoftDelete),
            "R" => Ok(Self::Restore),
            other => Err(format!("unknown change type code: {other}")),
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Check a raw change type code; unknown codes are neither
#[must_use]
pub fn is_trashed_or_restored(code: &str) -> bool {
    code.parse::<ChangeType>()
        .map(ChangeType::is_trashed_or_restored)
        .unwrap_or(false)
}

/// Profile part of a user reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Given name
    #[serde(default)]
    pub first_name: String,
    /// Family name
    #[serde(default)]
    pub last_name: String,
}

/// User who performed a change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// User primary key
    #[serde(default)]
    pub pk: Option<i64>,
    /// Login name
    #[serde(default)]
    pub username: String,
    /// Mail address
    #[serde(default)]
    pub email: Option<String>,
    /// Optional profile
    #[serde(default)]
    pub userprofile: Option<UserProfile>,
}

impl UserRef {
    /// Human-readable name with placeholder fallback
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(profile) = &self.userprofile {
            let full = format!("{} {}", profile.first_name.trim(), profile.last_name.trim());
            let full = full.trim();
            if !full.is_empty() {
                return full.to_string();
            }
        }
        if self.username.trim().is_empty() {
            UNKNOWN_USER.to_string()
        } else {
            self.username.clone()
        }
    }
}

/// Content type of the tracked entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    /// Content type id
    #[serde(default)]
    pub id: Option<i64>,
    /// Django app label
    #[serde(default)]
    pub app_label: String,
    /// Model name (`task`, `dmp`, `resource`, ...)
    #[serde(default)]
    pub model: String,
}

/// Before/after state of one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Name of the changed field
    pub field_name: String,
    /// Previous value, JSON-encoded for collection fields
    #[serde(default)]
    pub old_value: Option<String>,
    /// New value, JSON-encoded for collection fields
    #[serde(default)]
    pub new_value: Option<String>,
}

impl ChangeRecord {
    /// Create record
    #[inline]
    #[must_use]
    pub fn new(
        field_name: impl Into<String>,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            old_value,
            new_value,
        }
    }

    /// Previous value as str
    #[inline]
    #[must_use]
    pub fn old_raw(&self) -> Option<&str> {
        self.old_value.as_deref()
    }

    /// New value as str
    #[inline]
    #[must_use]
    pub fn new_raw(&self) -> Option<&str> {
        self.new_value.as_deref()
    }
}

/// One historical event of a tracked entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Change set id
    #[serde(rename = "pk")]
    pub id: ChangeSetId,
    /// Time of the change
    #[serde(rename = "date")]
    pub changed_at: DateTime<Utc>,
    /// Acting user, absent for system changes
    #[serde(rename = "user", default)]
    pub changed_by: Option<UserRef>,
    /// Content type of the changed entity
    #[serde(default)]
    pub object_type: Option<ObjectType>,
    /// Id of the changed entity
    #[serde(default)]
    pub object_uuid: Option<String>,
    /// Mutation kind
    #[serde(rename = "changeset_type")]
    pub change_type: ChangeType,
    /// Touched fields, in backend order
    #[serde(default)]
    pub change_records: Vec<ChangeRecord>,
}

impl ChangeSet {
    /// Display name of the acting user
    #[must_use]
    pub fn author(&self) -> String {
        self.changed_by
            .as_ref()
            .map_or_else(|| UNKNOWN_USER.to_string(), UserRef::display_name)
    }

    /// Model of the changed entity, if the backend sent it
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.object_type
            .as_ref()
            .map(|t| t.model.as_str())
            .filter(|m| !m.is_empty())
    }
}

/// One item of a collection-valued field snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshotEntry {
    /// Model tag (`label`, `checklistitem`, `metadata`, ...)
    #[serde(default)]
    pub model: String,
    /// Primary key, normalized to a string
    #[serde(default, deserialize_with = "deserialize_key")]
    pub pk: String,
    /// Attribute values; shape depends on `model`
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl FieldSnapshotEntry {
    /// Create entry
    #[must_use]
    pub fn new(model: impl Into<String>, pk: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            model: model.into(),
            pk: pk.into(),
            fields,
        }
    }

    /// Raw field value
    #[inline]
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Field rendered as text; strings as-is, numbers and booleans formatted
    #[must_use]
    pub fn field_str(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Boolean field, `false` when missing
    #[must_use]
    pub fn field_bool(&self, name: &str) -> bool {
        self.fields
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// Flat `name`/`value` record, e.g. one answer of a DMP form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDataEntry {
    /// Question or field name
    pub name: String,
    /// Answer text
    pub value: String,
}

impl FormDataEntry {
    /// Create entry
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
