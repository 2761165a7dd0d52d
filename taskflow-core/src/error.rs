//! Error types for the task store and tag parsing.

use thiserror::Error;

/// Failures reported by `TaskStore` mutations. The store is left unchanged
/// whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("task '{task_id}' not found")]
    NotFound { task_id: String },
}

impl StoreError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        StoreError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn not_found(task_id: impl Into<String>) -> Self {
        StoreError::NotFound {
            task_id: task_id.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// A text tag from the UI layer did not name a known value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} '{value}' (expected {expected})")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl ParseError {
    pub fn new(kind: &'static str, value: impl Into<String>, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.into(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = StoreError::not_found("42");
        assert_eq!(err.to_string(), "task '42' not found");
        assert!(err.is_not_found());

        let err = StoreError::validation("title", "must not be empty");
        assert_eq!(err.to_string(), "invalid title: must not be empty");
        assert!(err.is_validation());

        let err = ParseError::new("filter", "later", "all|pending");
        assert_eq!(err.to_string(), "invalid filter 'later' (expected all|pending)");
    }
}
