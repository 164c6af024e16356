//! JSON file context provider
//!
//! Reads three documents:
//!
//! | File | Shape |
//! |------|-------|
//! | profiles | `{"profiles": [{"id": ...}, ...]}` or a single profile object |
//! | calendar | `{"events": [...]}` with `start.dateTime` per event |
//! | tasks | `{"tasks": [...]}` with `status` and `due` per task |
//!
//! Window filtering happens on every call against the injected clock, so a
//! provider can serve several requests over a long-running process.

use atlas_application::ports::context_provider::{ContextError, ContextProvider};
use atlas_application::use_cases::agents::{Clock, system_clock};
use atlas_domain::context::time_window::{filter_active_tasks, filter_upcoming_events};
use atlas_domain::{Document, Filtered};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Context provider backed by JSON files loaded once at construction
pub struct JsonContextProvider {
    profiles: Vec<Value>,
    events: Vec<Value>,
    tasks: Vec<Value>,
    clock: Clock,
}

impl JsonContextProvider {
    /// Read and validate the three files
    pub fn open(
        profiles_path: impl AsRef<Path>,
        calendar_path: impl AsRef<Path>,
        tasks_path: impl AsRef<Path>,
    ) -> Result<Self, ContextError> {
        Self::from_documents(
            read_json(profiles_path.as_ref())?,
            read_json(calendar_path.as_ref())?,
            read_json(tasks_path.as_ref())?,
        )
    }

    /// Build from already-parsed documents
    pub fn from_documents(profiles: Value, calendar: Value, tasks: Value) -> Result<Self, ContextError> {
        let profiles = match profiles {
            Value::Object(mut map) => match map.remove("profiles") {
                Some(Value::Array(list)) => list,
                Some(_) => return Err(malformed("profiles", "'profiles' must be a list")),
                None => vec![Value::Object(map)],
            },
            _ => return Err(malformed("profiles", "expected a JSON object")),
        };

        Ok(Self {
            profiles,
            events: collection(calendar, "calendar", "events")?,
            tasks: collection(tasks, "tasks", "tasks")?,
            clock: system_clock(),
        })
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Id of the first profile, used when no student is named
    pub fn default_student_id(&self) -> Option<String> {
        self.profiles.first().and_then(|profile| match profile.get("id") {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        })
    }
}

impl ContextProvider for JsonContextProvider {
    fn profile(&self, student_id: &str) -> Result<Document, ContextError> {
        self.profiles
            .iter()
            .find(|profile| id_matches(profile.get("id"), student_id))
            .and_then(Value::as_object)
            .cloned()
            .ok_or_else(|| ContextError::ProfileNotFound(student_id.to_string()))
    }

    fn upcoming_events(&self, window_days: u32) -> Result<Vec<Value>, ContextError> {
        let filtered = filter_upcoming_events(&self.events, (self.clock)(), window_days);
        Ok(report("calendar event", filtered))
    }

    fn active_tasks(&self) -> Result<Vec<Value>, ContextError> {
        Ok(report("task", filter_active_tasks(&self.tasks, (self.clock)())))
    }
}

fn read_json(path: &Path) -> Result<Value, ContextError> {
    let source_name = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| ContextError::Unreadable {
        source_name: source_name.clone(),
        reason: e.to_string(),
    })?;
    debug!(path = %source_name, bytes = content.len(), "Read context file");
    serde_json::from_str(&content).map_err(|e| ContextError::Malformed {
        source_name,
        reason: e.to_string(),
    })
}

fn collection(document: Value, source_name: &str, field: &str) -> Result<Vec<Value>, ContextError> {
    match document {
        Value::Object(mut map) => match map.remove(field) {
            Some(Value::Array(list)) => Ok(list),
            _ => Err(malformed(source_name, &format!("missing '{field}' list"))),
        },
        _ => Err(malformed(source_name, "expected a JSON object")),
    }
}

fn malformed(source_name: &str, reason: &str) -> ContextError {
    ContextError::Malformed {
        source_name: source_name.to_string(),
        reason: reason.to_string(),
    }
}

fn id_matches(id: Option<&Value>, student_id: &str) -> bool {
    match id {
        Some(Value::String(id)) => id == student_id,
        Some(Value::Number(id)) => id.to_string() == student_id,
        _ => false,
    }
}

/// Warn about every skipped record and return the kept ones
fn report(kind: &str, filtered: Filtered) -> Vec<Value> {
    for skipped in &filtered.skipped {
        warn!(index = skipped.index, error = %skipped.error, "Skipping malformed {}", kind);
    }
    filtered.kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::sync::Arc;

    fn fixed_clock() -> Clock {
        Arc::new(|| Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())
    }

    fn provider() -> JsonContextProvider {
        JsonContextProvider::from_documents(
            json!({"profiles": [
                {"id": "student_123", "personal_info": {"major": "Computer Science"}},
                {"id": 42}
            ]}),
            json!({"events": [
                {"summary": "Exam", "start": {"dateTime": "2025-06-02T09:00:00+02:00"}},
                {"summary": "Past", "start": {"dateTime": "2025-05-30T09:00:00Z"}},
                {"summary": "Far", "start": {"dateTime": "2025-07-01T09:00:00Z"}},
                {"summary": "Broken", "start": {"dateTime": "next tuesday"}},
                {"summary": "No start"}
            ]}),
            json!({"tasks": [
                {"title": "Essay", "status": "needsAction", "due": "2025-06-03T00:00:00Z"},
                {"title": "Done", "status": "completed", "due": "2025-06-03T00:00:00Z"},
                {"title": "Late", "status": "needsAction", "due": "2025-05-01T00:00:00Z"},
                {"title": "Undated", "status": "needsAction"}
            ]}),
        )
        .unwrap()
        .with_clock(fixed_clock())
    }

    #[test]
    fn test_profile_lookup() {
        let provider = provider();
        let profile = provider.profile("student_123").unwrap();
        assert_eq!(profile["personal_info"]["major"], "Computer Science");
        assert!(provider.profile("42").is_ok());
        assert_eq!(provider.default_student_id().as_deref(), Some("student_123"));
        assert_eq!(
            provider.profile("nobody"),
            Err(ContextError::ProfileNotFound("nobody".to_string()))
        );
    }

    #[test]
    fn test_single_profile_document() {
        let provider = JsonContextProvider::from_documents(
            json!({"id": "solo"}),
            json!({"events": []}),
            json!({"tasks": []}),
        )
        .unwrap();
        assert!(provider.profile("solo").is_ok());
    }

    #[test]
    fn test_upcoming_events_window_skips_malformed() {
        let events = provider().upcoming_events(7).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["summary"], "Exam");

        let events = provider().upcoming_events(60).unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_active_tasks() {
        let tasks = provider().active_tasks().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0]["title"], "Essay");
        assert_eq!(tasks[0]["due_datetime"], "2025-06-03T00:00:00Z");
    }

    #[test]
    fn test_missing_collections_are_malformed() {
        let result = JsonContextProvider::from_documents(
            json!({"profiles": []}),
            json!({"items": []}),
            json!({"tasks": []}),
        );
        assert!(matches!(result, Err(ContextError::Malformed { .. })));

        let result =
            JsonContextProvider::from_documents(json!([]), json!({"events": []}), json!({"tasks": []}));
        assert!(matches!(result, Err(ContextError::Malformed { .. })));
    }

    #[test]
    fn test_open_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = dir.path().join("profiles.json");
        let calendar = dir.path().join("calendar.json");
        let tasks = dir.path().join("tasks.json");
        fs::write(&profiles, r#"{"profiles": [{"id": "s1"}]}"#).unwrap();
        fs::write(&calendar, r#"{"events": []}"#).unwrap();
        fs::write(&tasks, r#"{"tasks": []}"#).unwrap();

        let provider = JsonContextProvider::open(&profiles, &calendar, &tasks).unwrap();
        assert!(provider.profile("s1").is_ok());
        assert!(provider.active_tasks().unwrap().is_empty());
    }

    #[test]
    fn test_open_reports_unreadable_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let invalid = dir.path().join("invalid.json");
        fs::write(&invalid, "{not json").unwrap();

        assert!(matches!(
            JsonContextProvider::open(&missing, &invalid, &invalid),
            Err(ContextError::Unreadable { .. })
        ));
        assert!(matches!(
            JsonContextProvider::open(&invalid, &invalid, &invalid),
            Err(ContextError::Malformed { .. })
        ));
    }
}
