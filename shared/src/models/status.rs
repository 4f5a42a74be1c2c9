//! Lifecycle of packing and invoice records

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Draft -> Saved -> Approved
///
/// Drafts live only on the client. Approved records are locked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    #[default]
    Draft,
    Saved,
    Approved,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Draft => "draft",
            RecordStatus::Saved => "saved",
            RecordStatus::Approved => "approved",
        }
    }

    pub fn is_locked(&self) -> bool {
        *self == RecordStatus::Approved
    }

    /// Move to `to`, rejecting skipped or backward steps
    pub fn transition(self, to: RecordStatus) -> Result<RecordStatus, ValidationError> {
        match (self, to) {
            (RecordStatus::Draft, RecordStatus::Saved)
            | (RecordStatus::Saved, RecordStatus::Approved) => Ok(to),
            (from, to) => Err(ValidationError::InvalidTransition { from, to }),
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordStatus::Draft => write!(f, "Draft"),
            RecordStatus::Saved => write!(f, "Saved"),
            RecordStatus::Approved => write!(f, "Approved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert_eq!(
            RecordStatus::Draft.transition(RecordStatus::Saved),
            Ok(RecordStatus::Saved)
        );
        assert_eq!(
            RecordStatus::Saved.transition(RecordStatus::Approved),
            Ok(RecordStatus::Approved)
        );
    }

    #[test]
    fn test_invalid_transitions() {
        let invalid = [
            (RecordStatus::Draft, RecordStatus::Approved), // Skip saving
            (RecordStatus::Approved, RecordStatus::Saved),  // Unlock
            (RecordStatus::Saved, RecordStatus::Draft),     // Backward
            (RecordStatus::Approved, RecordStatus::Approved),
        ];

        for (from, to) in invalid {
            assert!(from.transition(to).is_err(), "{} -> {}", from, to);
        }
    }

    #[test]
    fn test_only_approved_is_locked() {
        assert!(!RecordStatus::Draft.is_locked());
        assert!(!RecordStatus::Saved.is_locked());
        assert!(RecordStatus::Approved.is_locked());
    }
}
