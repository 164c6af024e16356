//! Domain layer for atlas
//!
//! Pure logic of the orchestration engine: no I/O, no async runtime.
//!
//! # Core Concepts
//!
//! - **State**: the [`AcademicState`] document threaded through one request;
//!   partial results combine only through the recursive [`merge`] rule.
//! - **Routing**: the coordinator's free text becomes a [`RoutingDecision`]
//!   listing required agents and the concurrent groups they run in.
//! - **Workflow**: a fixed graph of [`WorkflowNode`]s whose execution is
//!   reported as [`WorkflowStep`]s; a [`LoopPolicy`] decides whether the
//!   graph runs again.

pub mod config;
pub mod context;
pub mod core;
pub mod prompt;
pub mod routing;
pub mod state;
pub mod workflow;

pub use config::OutputFormat;
pub use context::{ContextSummary, Filtered, SkippedRecord};
pub use core::{error::DomainError, request::Request};
pub use prompt::{AgentPromptTemplate, Exemplar, PromptTemplate};
pub use routing::{AdvisorPlacement, AgentKind, RoutingDecision, parse_routing_response};
pub use state::{
    document::{Document, merge, merged},
    entities::{AGENT_OUTPUTS_KEY, AcademicState, COORDINATOR_ANALYSIS_KEY, PROFILE_ANALYSIS_KEY},
    message::{Message, Role},
    store::{StateStore, StateStoreError},
};
pub use workflow::{
    LoopPolicy, SinglePass, UntilRequiredSatisfied, WorkflowNode, WorkflowPolicy, WorkflowStep,
};
