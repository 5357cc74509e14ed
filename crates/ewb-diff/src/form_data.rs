//! Positional diff of flat `name`/`value` records (DMP form data)

use ewb_snapshot::FormDataEntry;
use serde::{Deserialize, Serialize};

/// Changed answer of a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDataChange {
    /// Field name, taken from the new entry
    pub name: String,
    /// Previous answer
    pub old_value: String,
    /// New answer
    pub new_value: String,
}

/// Pair entries by position and report changed values
///
/// Returns nothing when either side is empty or the lengths differ; a form
/// whose structure changed is not compared entry by entry.
#[must_use]
pub fn diff_form_data(old: &[FormDataEntry], new: &[FormDataEntry]) -> Vec<FormDataChange> {
    if old.is_empty() || new.is_empty() || old.len() != new.len() {
        return Vec::new();
    }

    old.iter()
        .zip(new)
        .filter(|(o, n)| o.value != n.value)
        .map(|(o, n)| FormDataChange {
            name: n.name.clone(),
            old_value: o.value.clone(),
            new_value: n.value.clone(),
        })
        .collect()
}
