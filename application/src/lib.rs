//! Application layer for atlas
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    context_provider::{ContextError, ContextProvider},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{NoProgress, ProgressNotifier},
    text_generation::{GenerationError, TextGenerator},
};
pub use use_cases::agents::{
    Agent, AgentError, AgentOutput, AdvisorAgent, NoteWriterAgent, PlannerAgent, standard_agents,
};
pub use use_cases::coordinate::{Coordinator, RoutingOutcome};
pub use use_cases::execute_agents::AgentExecutor;
pub use use_cases::run_workflow::{Orchestrator, WorkflowOutcome};
pub use use_cases::start_session::{
    SessionError, StartSessionUseCase, start_session, validate_records,
};
