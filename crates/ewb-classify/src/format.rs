//! Display captions for field names

/// Turn a field name into a display caption
///
/// Underscores become spaces. Case is left alone.
#[must_use]
pub fn format_field_name(name: &str) -> String {
    name.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underscores_only() {
        assert_eq!(format_field_name("last_name"), "last name");
        assert_eq!(format_field_name("FirstName"), "FirstName");
        assert_eq!(format_field_name("date_time_start"), "date time start");
        assert_eq!(format_field_name(""), "");
    }
}
