//! Display labels for choice-coded fields

use crate::kind::FieldKind;

const TASK_STATES: &[(&str, &str)] = &[("NEW", "New"), ("PROG", "In progress"), ("DONE", "Done")];

const TASK_PRIORITIES: &[(&str, &str)] = &[
    ("1", "Very low"),
    ("2", "Low"),
    ("3", "Normal"),
    ("4", "High"),
    ("5", "Very high"),
];

const DMP_STATUSES: &[(&str, &str)] = &[("NEW", "New"), ("PROG", "In progress"), ("FIN", "Final")];

const RESOURCE_TYPES: &[(&str, &str)] = &[
    ("ROOM", "Room"),
    ("LABEQ", "Lab equipment"),
    ("OFFEQ", "Office equipment"),
    ("ITSERV", "IT service"),
];

const USAGE_SETTINGS: &[(&str, &str)] = &[
    ("GLB", "Global"),
    ("GRP", "Only selected user groups"),
];

fn table(kind: FieldKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        FieldKind::TaskState => TASK_STATES,
        FieldKind::TaskPriority => TASK_PRIORITIES,
        FieldKind::DmpStatus => DMP_STATUSES,
        FieldKind::ResourceType => RESOURCE_TYPES,
        FieldKind::ResourceUsageSetting => USAGE_SETTINGS,
        _ => &[],
    }
}

/// Label for a choice code; `None` for unknown codes or non-choice kinds
#[must_use]
pub fn choice_label(kind: FieldKind, code: &str) -> Option<&'static str> {
    table(kind)
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(choice_label(FieldKind::TaskState, "PROG"), Some("In progress"));
        assert_eq!(choice_label(FieldKind::TaskPriority, "5"), Some("Very high"));
        assert_eq!(choice_label(FieldKind::DmpStatus, "FIN"), Some("Final"));
        assert_eq!(choice_label(FieldKind::ResourceType, "LABEQ"), Some("Lab equipment"));
        assert_eq!(choice_label(FieldKind::ResourceUsageSetting, "GLB"), Some("Global"));
    }

    #[test]
    fn unknown_codes_and_kinds() {
        assert_eq!(choice_label(FieldKind::TaskState, "FIN"), None);
        assert_eq!(choice_label(FieldKind::Generic, "NEW"), None);
    }

    #[test]
    fn every_choice_kind_has_labels() {
        for kind in FieldKind::ALL {
            assert_eq!(kind.is_choice(), !table(kind).is_empty(), "{kind}");
        }
    }
}
