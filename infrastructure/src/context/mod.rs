//! Student context adapters
//!
//! [`JsonContextProvider`] implements the
//! [`ContextProvider`](atlas_application::ContextProvider) port over three
//! JSON documents read from disk.

mod json_provider;

pub use json_provider::JsonContextProvider;
