//! Set differences between two snapshot lists

use ewb_snapshot::FieldSnapshotEntry;
use serde::{Deserialize, Serialize};

/// Entries present on only one side of a comparison
///
/// # Invariants
/// - Order inside each list follows the input order
/// - Duplicates are kept; nothing is collapsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult<T> {
    /// Old entries without an equal new entry (removed)
    pub only_in_old: Vec<T>,
    /// New entries without an equal old entry (added)
    pub only_in_new: Vec<T>,
}

impl<T> DiffResult<T> {
    /// Empty result
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            only_in_old: Vec::new(),
            only_in_new: Vec::new(),
        }
    }

    /// Nothing added or removed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.only_in_old.is_empty() && self.only_in_new.is_empty()
    }

    /// Total number of differing entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.only_in_old.len() + self.only_in_new.len()
    }

    /// Removed entries
    #[inline]
    #[must_use]
    pub fn removed(&self) -> &[T] {
        &self.only_in_old
    }

    /// Added entries
    #[inline]
    #[must_use]
    pub fn added(&self) -> &[T] {
        &self.only_in_new
    }

    /// Convert both sides
    #[must_use]
    pub fn map<U, F>(self, mut f: F) -> DiffResult<U>
    where
        F: FnMut(T) -> U,
    {
        DiffResult {
            only_in_old: self.only_in_old.into_iter().map(&mut f).collect(),
            only_in_new: self.only_in_new.into_iter().map(&mut f).collect(),
        }
    }
}

impl<T> Default for DiffResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Diff with a custom equality
///
/// Each old entry is tested against all new entries and vice versa.
#[must_use]
pub fn diff_by<T, F>(old: &[T], new: &[T], eq: F) -> DiffResult<T>
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    let only_in_old = old
        .iter()
        .filter(|&o| !new.iter().any(|n| eq(o, n)))
        .cloned()
        .collect();
    let only_in_new = new
        .iter()
        .filter(|&n| !old.iter().any(|o| eq(o, n)))
        .cloned()
        .collect();

    DiffResult {
        only_in_old,
        only_in_new,
    }
}

/// Diff by deep equality of `fields`; `pk` and `model` are ignored
///
/// An entry whose pk is unchanged but whose fields differ shows up on both
/// sides.
#[must_use]
pub fn diff_by_value(
    old: &[FieldSnapshotEntry],
    new: &[FieldSnapshotEntry],
) -> DiffResult<FieldSnapshotEntry> {
    diff_by(old, new, |a, b| a.fields == b.fields)
}

/// Diff by primary key only
#[must_use]
pub fn diff_by_pk(
    old: &[FieldSnapshotEntry],
    new: &[FieldSnapshotEntry],
) -> DiffResult<FieldSnapshotEntry> {
    diff_by(old, new, |a, b| a.pk == b.pk)
}

/// Equality strategy for collection fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldDiffer {
    /// Compare `fields` contents
    ByValue,
    /// Compare primary keys
    ByPk,
}

impl FieldDiffer {
    /// Run the selected diff
    #[must_use]
    pub fn diff(
        self,
        old: &[FieldSnapshotEntry],
        new: &[FieldSnapshotEntry],
    ) -> DiffResult<FieldSnapshotEntry> {
        match self {
            Self::ByValue => diff_by_value(old, new),
            Self::ByPk => diff_by_pk(old, new),
        }
    }
}
