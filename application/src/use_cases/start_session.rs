//! Start session use case
//!
//! Validates the request and the student's records, then builds a loaded
//! [`StateStore`] holding the request as the first user message.

use crate::ports::context_provider::{ContextError, ContextProvider};
use atlas_domain::state::document::single;
use atlas_domain::{Document, DomainError, Message, Request, StateStore, StateStoreError};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that prevent a session from starting
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    InvalidRequest(#[from] DomainError),

    #[error("Profile must contain an 'id'")]
    MissingProfileId,

    #[error("{record} record must contain a '{field}' list")]
    MissingCollection {
        record: &'static str,
        field: &'static str,
    },

    #[error("Context error: {0}")]
    Context(#[from] ContextError),

    #[error(transparent)]
    Store(#[from] StateStoreError),
}

/// Check the shape of the three session inputs
pub fn validate_records(
    profile: &Document,
    calendar: &Document,
    tasks: &Document,
) -> Result<(), SessionError> {
    match profile.get("id") {
        Some(Value::String(id)) if !id.trim().is_empty() => {}
        Some(Value::Number(_)) => {}
        _ => return Err(SessionError::MissingProfileId),
    }
    if !calendar.get("events").is_some_and(Value::is_array) {
        return Err(SessionError::MissingCollection {
            record: "calendar",
            field: "events",
        });
    }
    if !tasks.get("tasks").is_some_and(Value::is_array) {
        return Err(SessionError::MissingCollection {
            record: "tasks",
            field: "tasks",
        });
    }
    Ok(())
}

/// Use case for preparing the state of one request
pub struct StartSessionUseCase {
    provider: Arc<dyn ContextProvider>,
    window_days: u32,
}

impl StartSessionUseCase {
    pub fn new(provider: Arc<dyn ContextProvider>, window_days: u32) -> Self {
        Self {
            provider,
            window_days,
        }
    }

    /// Load `student_id`'s records from the provider and start a session
    pub fn execute(&self, student_id: &str, request: &str) -> Result<Arc<StateStore>, SessionError> {
        let request = Request::try_new(request)?;
        let profile = self.provider.profile(student_id)?;
        let events = self.provider.upcoming_events(self.window_days)?;
        let tasks = self.provider.active_tasks()?;
        info!(
            student = student_id,
            events = events.len(),
            tasks = tasks.len(),
            "Loaded student context"
        );

        start_session(
            profile,
            single("events", Value::Array(events)),
            single("tasks", Value::Array(tasks)),
            request,
        )
    }
}

/// Start a session from records supplied directly
pub fn start_session(
    profile: Document,
    calendar: Document,
    tasks: Document,
    request: Request,
) -> Result<Arc<StateStore>, SessionError> {
    validate_records(&profile, &calendar, &tasks)?;
    let store = StateStore::new();
    store.load(profile, calendar, tasks)?;
    store.append_message(Message::user(request.into_content()));
    Ok(Arc::new(store))
}
