//! Error types for snapshot parsing

/// Errors while decoding a serialized field snapshot
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// Snapshot text is not valid JSON or not a list of `{model, pk, fields}`
    #[error("malformed snapshot: {message}")]
    Malformed {
        /// Decoder message
        message: String,
    },

    /// Snapshot decoded, but into a shape the caller did not ask for
    #[error("unexpected snapshot shape: expected {expected}, found {found}")]
    UnexpectedShape {
        /// Requested shape
        expected: &'static str,
        /// Shape actually present
        found: &'static str,
    },
}

impl SnapshotError {
    /// Create malformed error from a decoder message
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display() {
        let err = SnapshotError::malformed("expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "malformed snapshot: expected value at line 1 column 1"
        );
    }

    #[test]
    fn unexpected_shape_display() {
        let err = SnapshotError::UnexpectedShape {
            expected: "entries",
            found: "object",
        };
        assert!(err.to_string().contains("expected entries, found object"));
    }

    #[test]
    fn from_serde_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let err: SnapshotError = serde_err.into();
        assert!(matches!(err, SnapshotError::Malformed { .. }));
    }
}
