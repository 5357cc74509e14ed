//! Field differ for change snapshots
//!
//! Computes which entries of a collection field were removed and which were
//! added between two snapshots.
//!
//! - [`diff_by_value`]: entries match when their `fields` are deeply equal
//! - [`diff_by_pk`]: entries match when their primary keys are equal
//! - [`diff_form_data`]: positional comparison of flat `name`/`value` lists
//!
//! All scans are quadratic. Snapshot lists hold tens of items at most.

#![warn(unreachable_pub)]

pub mod form_data;
pub mod set;

pub use form_data::{diff_form_data, FormDataChange};
pub use set::{diff_by, diff_by_pk, diff_by_value, DiffResult, FieldDiffer};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
