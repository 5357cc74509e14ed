//! Presentation state of a change list

use crate::entity::EntityRef;
use crate::error::HistoryResult;
use crate::history::{ChangeHistory, EnrichedChangeSet};
use ewb_snapshot::ChangeSetId;
use std::collections::HashSet;
use tracing::error;

/// Which change sets are expanded
///
/// Kept apart from the change sets themselves; reloading the list does not
/// reset it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<ChangeSetId>,
}

impl ExpansionState {
    /// Nothing expanded
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a change set; returns the new state
    pub fn toggle(&mut self, id: &ChangeSetId) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    /// Check a change set
    #[inline]
    #[must_use]
    pub fn is_expanded(&self, id: &ChangeSetId) -> bool {
        self.expanded.contains(id)
    }

    /// Collapse everything
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Number of expanded change sets
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Check if nothing is expanded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

/// Recent changes list of one entity
#[derive(Debug, Clone, Default)]
pub struct ChangeListView {
    /// A load is in progress
    pub loading: bool,
    /// Loaded change sets, newest first
    pub changes: Vec<EnrichedChangeSet>,
    /// Expanded change sets
    pub expansion: ExpansionState,
}

impl ChangeListView {
    /// Empty view
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the entity's changes into the view
    ///
    /// On failure the list is cleared and the error returned; there is no
    /// retry. `loading` is false once this returns.
    ///
    /// # Errors
    /// Returns the error of [`ChangeHistory::load_changes`]
    pub async fn load(&mut self, history: &ChangeHistory, entity: &EntityRef) -> HistoryResult<()> {
        self.loading = true;
        let result = history.load_changes(entity).await;
        self.loading = false;

        match result {
            Ok(changes) => {
                self.changes = changes;
                Ok(())
            }
            Err(e) => {
                error!("Could not load changes of {}: {}", entity, e);
                self.changes.clear();
                Err(e)
            }
        }
    }

    /// Flip a change set; returns the new state
    pub fn toggle_expanded(&mut self, id: &ChangeSetId) -> bool {
        self.expansion.toggle(id)
    }

    /// Check a change set
    #[inline]
    #[must_use]
    pub fn is_expanded(&self, id: &ChangeSetId) -> bool {
        self.expansion.is_expanded(id)
    }

    /// Loaded change sets that show field diffs
    pub fn with_field_changes(&self) -> impl Iterator<Item = &EnrichedChangeSet> {
        self.changes.iter().filter(|c| !c.is_trashed_or_restored())
    }
}
