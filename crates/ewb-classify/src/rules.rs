//! Ordered classification rules

use crate::kind::FieldKind;

/// One exact-match rule
///
/// Matches when the field name is listed and, if `content_type` is set, the
/// model equals it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRule {
    /// Resulting kind
    pub kind: FieldKind,
    /// Field names that match
    pub fields: &'static [&'static str],
    /// Required content type model, if any
    pub content_type: Option<&'static str>,
}

impl ClassificationRule {
    const fn any(kind: FieldKind, fields: &'static [&'static str]) -> Self {
        Self {
            kind,
            fields,
            content_type: None,
        }
    }

    const fn scoped(kind: FieldKind, model: &'static str, fields: &'static [&'static str]) -> Self {
        Self {
            kind,
            fields,
            content_type: Some(model),
        }
    }

    /// Check rule against a field
    #[must_use]
    pub fn matches(&self, content_type_model: &str, field_name: &str) -> bool {
        self.fields.iter().any(|f| *f == field_name)
            && self
                .content_type
                .map_or(true, |model| model == content_type_model)
    }
}

/// Classification table; first match wins
pub const RULES: &[ClassificationRule] = &[
    ClassificationRule::any(
        FieldKind::Html,
        &["description", "text", "notes", "html_content", "content"],
    ),
    ClassificationRule::any(FieldKind::Checklist, &["checklist_items"]),
    ClassificationRule::any(FieldKind::Labels, &["labels"]),
    ClassificationRule::any(FieldKind::TaskBoardColumns, &["kanban_board_columns"]),
    ClassificationRule::any(
        FieldKind::DirectoryStructure,
        &["sub_directories", "directory_structure"],
    ),
    ClassificationRule::any(FieldKind::DmpForm, &["dmp_form"]),
    ClassificationRule::any(FieldKind::DmpFormData, &["dmp_form_data"]),
    ClassificationRule::scoped(FieldKind::DmpStatus, "dmp", &["status"]),
    ClassificationRule::any(FieldKind::Metadata, &["metadata"]),
    ClassificationRule::any(FieldKind::LabbookChildElements, &["child_elements"]),
    ClassificationRule::any(FieldKind::TermsOfUsePdf, &["terms_of_use_pdf"]),
    ClassificationRule::any(
        FieldKind::DateTime,
        &[
            "date_time_start",
            "date_time_end",
            "start_date",
            "due_date",
            "stop_date",
            "created_at",
            "last_modified_at",
            "deleted_at",
        ],
    ),
    ClassificationRule::any(FieldKind::FileSize, &["file_size"]),
    ClassificationRule::any(
        FieldKind::UserList,
        &[
            "assigned_users",
            "attending_users",
            "responsible_users",
            "user_availability_selected_users",
        ],
    ),
    ClassificationRule::any(FieldKind::ProjectList, &["projects"]),
    ClassificationRule::scoped(FieldKind::TaskState, "task", &["state"]),
    ClassificationRule::scoped(FieldKind::TaskPriority, "task", &["priority"]),
    ClassificationRule::scoped(FieldKind::ResourceType, "resource", &["type"]),
    ClassificationRule::any(FieldKind::ResourceUsageSetting, &["general_usage_setting"]),
    ClassificationRule::any(
        FieldKind::ResourceUsageSettingUserGroups,
        &["usage_setting_selected_user_groups"],
    ),
];

/// Classify a changed field
///
/// Total and pure: unmatched fields are [`FieldKind::Generic`].
#[must_use]
pub fn classify(content_type_model: &str, field_name: &str) -> FieldKind {
    RULES
        .iter()
        .find(|rule| rule.matches(content_type_model, field_name))
        .map_or(FieldKind::Generic, |rule| rule.kind)
}
