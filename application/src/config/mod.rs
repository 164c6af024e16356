//! Application-level configuration.
//!
//! - [`ExecutionParams`]: routing, agent and loop-policy parameters

pub mod execution_params;

pub use execution_params::ExecutionParams;
