//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod context_provider;
pub mod conversation_logger;
pub mod progress;
pub mod text_generation;
