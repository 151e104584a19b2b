//! Wire-level todo types.
//!
//! # Design
//! These types define the JSON contract only. The persisted document form
//! lives in the server crate next to the storage driver; keeping the wire
//! shape here means the contract can be checked without a database in sight.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TodoError;

/// A single todo item as it appears in API responses.
///
/// `id` is the hex rendering of the storage key. `created_at` serializes as
/// RFC 3339.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating or updating a todo.
///
/// `completed` falls back to `false` when omitted, and a body without a
/// `title` field deserializes to the empty string — both cases are caught by
/// [`TodoInput::validate`] rather than by serde, so every bad body produces
/// the same validation failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl TodoInput {
    /// Enforces the single invariant: the title must be non-empty.
    ///
    /// The title is checked exactly as received. Whitespace is not trimmed,
    /// so `" "` is a legal (if unhelpful) title.
    pub fn validate(&self) -> Result<(), TodoError> {
        if self.title.is_empty() {
            return Err(TodoError::InvalidTitle);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn todo_serializes_with_rfc3339_timestamp() {
        let todo = Todo {
            id: "64b0c1f2a3d4e5f60718293a".to_string(),
            title: "Buy milk".to_string(),
            completed: false,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        };

        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], "64b0c1f2a3d4e5f60718293a");
        assert_eq!(json["title"], "Buy milk");
        assert_eq!(json["completed"], false);
        assert_eq!(json["created_at"], "2024-05-01T12:30:00Z");
    }

    #[test]
    fn todo_roundtrips_through_json() {
        let todo = Todo {
            id: "0123456789abcdef01234567".to_string(),
            title: "Roundtrip".to_string(),
            completed: true,
            created_at: "2024-05-01T12:30:00Z".parse().unwrap(),
        };

        let json = serde_json::to_string(&todo).unwrap();
        let back: Todo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, todo);
    }

    #[test]
    fn input_completed_defaults_to_false() {
        let input: TodoInput = serde_json::from_str(r#"{"title":"Walk dog"}"#).unwrap();
        assert_eq!(input.title, "Walk dog");
        assert!(!input.completed);
    }

    #[test]
    fn input_without_title_decodes_to_empty_string() {
        let input: TodoInput = serde_json::from_str(r#"{"completed":true}"#).unwrap();
        assert_eq!(input.title, "");
        assert!(input.completed);
    }

    #[test]
    fn validate_rejects_empty_title() {
        let input = TodoInput {
            title: String::new(),
            completed: false,
        };
        assert!(matches!(input.validate(), Err(TodoError::InvalidTitle)));
    }

    #[test]
    fn validate_does_not_trim() {
        let input = TodoInput {
            title: "   ".to_string(),
            completed: false,
        };
        assert!(input.validate().is_ok());
    }
}
