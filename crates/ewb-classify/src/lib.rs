//! Field classification for change records
//!
//! Decides which renderer applies to a changed field. Classification is a
//! fixed lookup over `(content type model, field name)`; the data itself is
//! never inspected.
//!
//! # Example
//!
//! ```rust
//! use ewb_classify::{classify, FieldKind};
//!
//! assert_eq!(classify("task", "state"), FieldKind::TaskState);
//! assert_eq!(classify("meeting", "state"), FieldKind::Generic);
//! assert_eq!(classify("anything", "labels"), FieldKind::Labels);
//! ```

#![warn(unreachable_pub)]

pub mod choices;
pub mod format;
pub mod kind;
pub mod rules;

pub use choices::choice_label;
pub use ewb_snapshot::is_trashed_or_restored;
pub use format::format_field_name;
pub use kind::{FieldKind, RendererHint};
pub use rules::{classify, ClassificationRule, RULES};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
