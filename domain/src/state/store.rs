//! Shared, mergeable state store.
//!
//! Readers get cheap immutable snapshots (`Arc<AcademicState>`); writers go
//! through [`StateStore::merge`], which applies the whole update under one
//! write lock so no reader ever sees half of it.

use super::document::Document;
use super::entities::AcademicState;
use super::message::Message;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Errors from the state store contract
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateStoreError {
    #[error("state inputs were already loaded")]
    AlreadyLoaded,
}

#[derive(Debug, Default)]
struct Inner {
    state: Arc<AcademicState>,
    loaded: bool,
}

/// Append/merge-only store around one [`AcademicState`]
#[derive(Debug, Default)]
pub struct StateStore {
    inner: RwLock<Inner>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-built inputs, as if [`StateStore::load`] had already run
    pub fn from_state(state: AcademicState) -> Self {
        Self {
            inner: RwLock::new(Inner {
                state: Arc::new(state),
                loaded: true,
            }),
        }
    }

    /// Set the read-only inputs. Allowed exactly once.
    pub fn load(
        &self,
        profile: Document,
        calendar: Document,
        tasks: Document,
    ) -> Result<(), StateStoreError> {
        let mut inner = self.write();
        if inner.loaded {
            return Err(StateStoreError::AlreadyLoaded);
        }
        let conversation = inner.state.conversation().to_vec();
        let mut state = AcademicState::new(profile, calendar, tasks);
        for message in conversation {
            state.push_message(message);
        }
        inner.state = Arc::new(state);
        inner.loaded = true;
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.read().loaded
    }

    /// Apply `partial` to `results` atomically
    pub fn merge(&self, partial: Document) {
        if partial.is_empty() {
            return;
        }
        let mut inner = self.write();
        Arc::make_mut(&mut inner.state).merge_results(partial);
    }

    /// Append to the conversation
    pub fn append_message(&self, message: Message) {
        let mut inner = self.write();
        Arc::make_mut(&mut inner.state).push_message(message);
    }

    /// Read-only view of the current state
    pub fn snapshot(&self) -> Arc<AcademicState> {
        Arc::clone(&self.read().state)
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
