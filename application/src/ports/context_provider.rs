//! Context data port
//!
//! Supplies the student's profile, calendar events and tasks. Timestamps are
//! normalized to UTC before any window comparison, and malformed records are
//! skipped rather than failing the whole batch.

use atlas_domain::Document;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Failed to read {source_name}: {reason}")]
    Unreadable { source_name: String, reason: String },

    #[error("Malformed {source_name}: {reason}")]
    Malformed { source_name: String, reason: String },
}

/// Source of the read-only session inputs
pub trait ContextProvider: Send + Sync {
    /// Profile of the student with the given `id`
    fn profile(&self, student_id: &str) -> Result<Document, ContextError>;

    /// Events starting within `window_days` from now
    fn upcoming_events(&self, window_days: u32) -> Result<Vec<Value>, ContextError>;

    /// Tasks still to do and due in the future
    fn active_tasks(&self) -> Result<Vec<Value>, ContextError>;
}
