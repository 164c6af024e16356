//! Orchestration graph vocabulary: nodes, step records and the loop policy

pub mod node;
pub mod policy;

pub use node::{WorkflowNode, WorkflowStep};
pub use policy::{LoopPolicy, SinglePass, UntilRequiredSatisfied, WorkflowPolicy};
