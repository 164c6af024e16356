//! Agents: polymorphic multi-stage workers.
//!
//! Every agent implements [`Agent`]: it reads a state snapshot, runs its own
//! stage pipeline and returns only the deltas it produced. Stage failures
//! propagate as [`AgentError`] so the executor can attribute them.
//!
//! | Agent | Stages (result key → field) |
//! |-------|------------------------------|
//! | Planner | `calendar_analysis.analysis` → `task_analysis.analysis` → `final_plan.plan` |
//! | NoteWriter | `learning_analysis.analysis` → `generated_notes.notes` |
//! | Advisor | `situation_analysis.analysis` → `guidance.advice` |

pub mod advisor;
pub mod error;
pub mod notewriter;
pub mod output;
pub mod pipeline;
pub mod planner;

pub use advisor::AdvisorAgent;
pub use error::AgentError;
pub use notewriter::NoteWriterAgent;
pub use output::{AgentOutput, EMERGENCY_PLAN, emergency_outputs};
pub use pipeline::{Clock, Stage, StagePipeline, system_clock};
pub use planner::PlannerAgent;

use crate::config::ExecutionParams;
use crate::ports::conversation_logger::ConversationLogger;
use crate::ports::text_generation::TextGenerator;
use async_trait::async_trait;
use atlas_domain::{AcademicState, AgentKind};
use std::sync::Arc;

/// A unit of work producing a partial result from the current state
#[async_trait]
pub trait Agent: Send + Sync {
    fn kind(&self) -> AgentKind;

    /// Must not mutate `state`; returns additive deltas only
    async fn run(&self, state: &AcademicState) -> Result<AgentOutput, AgentError>;
}

/// The three standard agents sharing one text-generation handle
pub fn standard_agents(
    generator: Arc<dyn TextGenerator>,
    params: &ExecutionParams,
    logger: Arc<dyn ConversationLogger>,
) -> Vec<Arc<dyn Agent>> {
    vec![
        Arc::new(PlannerAgent::new(Arc::clone(&generator), params).with_logger(Arc::clone(&logger))),
        Arc::new(NoteWriterAgent::new(Arc::clone(&generator)).with_logger(Arc::clone(&logger))),
        Arc::new(AdvisorAgent::new(generator).with_logger(logger)),
    ]
}
