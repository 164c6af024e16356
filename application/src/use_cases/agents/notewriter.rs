//! NoteWriter agent: learning-style analysis → note synthesis

use super::error::AgentError;
use super::output::AgentOutput;
use super::pipeline::{Stage, StagePipeline, prior_text};
use super::Agent;
use crate::ports::conversation_logger::ConversationLogger;
use crate::ports::text_generation::TextGenerator;
use async_trait::async_trait;
use atlas_domain::prompt::exemplars::NOTEWRITER_EXEMPLARS;
use atlas_domain::{AcademicState, AgentKind, AgentPromptTemplate};
use std::sync::Arc;

pub const LEARNING_ANALYSIS_KEY: &str = "learning_analysis";
pub const GENERATED_NOTES_KEY: &str = "generated_notes";

/// Study materials shaped to the learner's style
pub struct NoteWriterAgent {
    pipeline: StagePipeline,
}

impl NoteWriterAgent {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        let analysis = Stage::new("learning_analysis", LEARNING_ANALYSIS_KEY, "analysis", |state| {
            Ok(AgentPromptTemplate::learning_analysis(
                &state.learning_preference("learning_style"),
                state.latest_request(),
            ))
        });

        let notes = Stage::new("note_synthesis", GENERATED_NOTES_KEY, "notes", |state| {
            let analysis = prior_text(state, LEARNING_ANALYSIS_KEY, "analysis")?;
            Ok(AgentPromptTemplate::note_synthesis(
                analysis,
                &state.learning_preference("learning_style"),
                NOTEWRITER_EXEMPLARS,
                state.latest_request(),
            ))
        });

        Self {
            pipeline: StagePipeline::new(AgentKind::NoteWriter, generator, vec![analysis, notes]),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.pipeline = self.pipeline.with_logger(logger);
        self
    }
}

#[async_trait]
impl Agent for NoteWriterAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::NoteWriter
    }

    async fn run(&self, state: &AcademicState) -> Result<AgentOutput, AgentError> {
        self.pipeline.run(state).await
    }
}
