//! Shared state for one request.
//!
//! - [`document`]: JSON documents and the recursive merge rule
//! - [`entities::AcademicState`]: the state threaded through the pipeline
//! - [`store::StateStore`]: load-once, merge-atomically container with snapshots
//! - [`message::Message`]: conversation and prompt messages

pub mod document;
pub mod entities;
pub mod message;
pub mod store;
