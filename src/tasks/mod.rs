// Task types and validation

pub mod file;
pub mod input;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Lowest accepted importance.
pub const IMPORTANCE_MIN: u8 = 1;
/// Highest accepted importance (most important).
pub const IMPORTANCE_MAX: u8 = 5;

/// Why a raw task field was rejected
///
/// Front ends match on this to re-prompt (CLI) or annotate the form
/// line (web) without tearing the session down.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("task name cannot be empty")]
    EmptyName,
    #[error("duration must be minutes (e.g. \"45\", \"1h30m\"), got '{0}'")]
    InvalidDuration(String),
    #[error("duration must be at least one minute")]
    ZeroDuration,
    #[error("importance must be a number between 1 and 5, got '{0}'")]
    InvalidImportance(String),
    #[error("importance {0} is out of range (1-5)")]
    ImportanceOutOfRange(u8),
    #[error("deadline must be YYYY-MM-DD, got '{0}'")]
    InvalidDeadline(String),
    #[error("expected 'name, minutes, importance[, deadline]', got '{0}'")]
    MalformedLine(String),
}

/// A single task in a planning session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned at construction
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Human-readable task name (also the retrieval query)
    pub name: String,

    /// Estimated effort in whole minutes
    pub duration_minutes: u32,

    /// Importance from 1 (lowest) to 5 (highest)
    pub importance: u8,

    /// Optional due date; tasks without one sort after dated tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

impl Task {
    /// Validate fields and construct a task with a fresh id
    pub fn new(
        name: &str,
        duration_minutes: u32,
        importance: u8,
        deadline: Option<NaiveDate>,
    ) -> Result<Self, ParseError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ParseError::EmptyName);
        }
        if duration_minutes == 0 {
            return Err(ParseError::ZeroDuration);
        }
        if !(IMPORTANCE_MIN..=IMPORTANCE_MAX).contains(&importance) {
            return Err(ParseError::ImportanceOutOfRange(importance));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            duration_minutes,
            importance,
            deadline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_name() {
        let task = Task::new("  Study Machine Learning  ", 60, 5, None).unwrap();
        assert_eq!(task.name, "Study Machine Learning");
    }

    #[test]
    fn test_new_rejects_empty_name() {
        assert_eq!(Task::new("   ", 60, 3, None), Err(ParseError::EmptyName));
    }

    #[test]
    fn test_new_rejects_zero_duration() {
        assert_eq!(Task::new("Read", 0, 3, None), Err(ParseError::ZeroDuration));
    }

    #[test]
    fn test_new_rejects_importance_out_of_range() {
        assert_eq!(
            Task::new("Read", 30, 0, None),
            Err(ParseError::ImportanceOutOfRange(0))
        );
        assert_eq!(
            Task::new("Read", 30, 6, None),
            Err(ParseError::ImportanceOutOfRange(6))
        );
    }

    #[test]
    fn test_new_accepts_importance_bounds() {
        assert!(Task::new("Read", 30, IMPORTANCE_MIN, None).is_ok());
        assert!(Task::new("Read", 30, IMPORTANCE_MAX, None).is_ok());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Task::new("A", 10, 3, None).unwrap();
        let b = Task::new("A", 10, 3, None).unwrap();
        assert_ne!(a.id, b.id);
    }
}
