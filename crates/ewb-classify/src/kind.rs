//! Field kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// Renderer category of a changed field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// Rich text
    Html,
    /// Checklist items of a task
    Checklist,
    /// Label references
    Labels,
    /// Columns of a task board
    TaskBoardColumns,
    /// Directory tree of a storage
    DirectoryStructure,
    /// Reference to a DMP form
    DmpForm,
    /// Answers of a DMP form
    DmpFormData,
    /// Status of a DMP
    DmpStatus,
    /// Metadata entries
    Metadata,
    /// Elements placed on a labbook
    LabbookChildElements,
    /// Terms of use document of a resource
    TermsOfUsePdf,
    /// Timestamp
    DateTime,
    /// Size in bytes
    FileSize,
    /// User references
    UserList,
    /// Project references
    ProjectList,
    /// State of a task
    TaskState,
    /// Priority of a task
    TaskPriority,
    /// Type of a resource
    ResourceType,
    /// Usage setting of a resource
    ResourceUsageSetting,
    /// User groups allowed to use a resource
    ResourceUsageSettingUserGroups,
    /// Anything else; shown as raw text
    Generic,
}

/// How a field kind is compared and rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RendererHint {
    /// Old and new scalar shown side by side
    Scalar,
    /// Entry lists diffed by `fields` equality
    ValueSet,
    /// Entry lists diffed by pk, names resolved remotely
    ReferenceSet,
    /// Positional `name`/`value` comparison
    FormData,
    /// Diffed while the change list loads
    Precomputed,
}

impl FieldKind {
    /// All kinds, in declaration order
    pub const ALL: [FieldKind; 21] = [
        Self::Html,
        Self::Checklist,
        Self::Labels,
        Self::TaskBoardColumns,
        Self::DirectoryStructure,
        Self::DmpForm,
        Self::DmpFormData,
        Self::DmpStatus,
        Self::Metadata,
        Self::LabbookChildElements,
        Self::TermsOfUsePdf,
        Self::DateTime,
        Self::FileSize,
        Self::UserList,
        Self::ProjectList,
        Self::TaskState,
        Self::TaskPriority,
        Self::ResourceType,
        Self::ResourceUsageSetting,
        Self::ResourceUsageSettingUserGroups,
        Self::Generic,
    ];

    /// Name as used on the wire
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Checklist => "checklist",
            Self::Labels => "labels",
            Self::TaskBoardColumns => "taskBoardColumns",
            Self::DirectoryStructure => "directoryStructure",
            Self::DmpForm => "dmpForm",
            Self::DmpFormData => "dmpFormData",
            Self::DmpStatus => "dmpStatus",
            Self::Metadata => "metadata",
            Self::LabbookChildElements => "labbookChildElements",
            Self::TermsOfUsePdf => "termsOfUsePdf",
            Self::DateTime => "dateTime",
            Self::FileSize => "fileSize",
            Self::UserList => "userList",
            Self::ProjectList => "projectList",
            Self::TaskState => "taskState",
            Self::TaskPriority => "taskPriority",
            Self::ResourceType => "resourceType",
            Self::ResourceUsageSetting => "resourceUsageSetting",
            Self::ResourceUsageSettingUserGroups => "resourceUsageSettingUserGroups",
            Self::Generic => "generic",
        }
    }

    /// Comparison strategy for this kind
    #[must_use]
    pub fn renderer_hint(self) -> RendererHint {
        match self {
            Self::Checklist
            | Self::TaskBoardColumns
            | Self::DirectoryStructure
            | Self::LabbookChildElements => RendererHint::ValueSet,
            Self::Labels
            | Self::UserList
            | Self::ProjectList
            | Self::ResourceUsageSettingUserGroups => RendererHint::ReferenceSet,
            Self::DmpFormData => RendererHint::FormData,
            Self::Metadata => RendererHint::Precomputed,
            Self::Html
            | Self::DmpForm
            | Self::DmpStatus
            | Self::TermsOfUsePdf
            | Self::DateTime
            | Self::FileSize
            | Self::TaskState
            | Self::TaskPriority
            | Self::ResourceType
            | Self::ResourceUsageSetting
            | Self::Generic => RendererHint::Scalar,
        }
    }

    /// Kinds whose value is a fixed choice code
    #[inline]
    #[must_use]
    pub fn is_choice(self) -> bool {
        matches!(
            self,
            Self::DmpStatus
                | Self::TaskState
                | Self::TaskPriority
                | Self::ResourceType
                | Self::ResourceUsageSetting
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
