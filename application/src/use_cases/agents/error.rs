//! Agent errors

use crate::ports::text_generation::GenerationError;
use atlas_domain::AgentKind;
use thiserror::Error;

/// Failure inside one agent's stage pipeline.
///
/// Propagated to the executor, which isolates it to the failing agent.
#[derive(Error, Debug, Clone)]
pub enum AgentError {
    #[error("{agent} stage '{stage}' failed: {source}")]
    Stage {
        agent: AgentKind,
        stage: &'static str,
        #[source]
        source: GenerationError,
    },

    #[error("{agent} stage '{stage}' found malformed state: {reason}")]
    MalformedState {
        agent: AgentKind,
        stage: &'static str,
        reason: String,
    },
}

impl AgentError {
    pub fn agent(&self) -> AgentKind {
        match self {
            AgentError::Stage { agent, .. } | AgentError::MalformedState { agent, .. } => *agent,
        }
    }

    pub fn stage(&self) -> &'static str {
        match self {
            AgentError::Stage { stage, .. } | AgentError::MalformedState { stage, .. } => stage,
        }
    }
}
