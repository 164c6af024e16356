//! Advisor agent: situation analysis → guidance synthesis

use super::error::AgentError;
use super::output::AgentOutput;
use super::pipeline::{Stage, StagePipeline, prior_text};
use super::Agent;
use crate::ports::conversation_logger::ConversationLogger;
use crate::ports::text_generation::TextGenerator;
use async_trait::async_trait;
use atlas_domain::prompt::exemplars::ADVISOR_EXEMPLARS;
use atlas_domain::{AcademicState, AgentKind, AgentPromptTemplate};
use serde_json::{Value, json};
use std::sync::Arc;

pub const SITUATION_ANALYSIS_KEY: &str = "situation_analysis";
pub const GUIDANCE_KEY: &str = "guidance";

/// Personalized academic guidance
pub struct AdvisorAgent {
    pipeline: StagePipeline,
}

impl AdvisorAgent {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        let situation = Stage::new("situation_analysis", SITUATION_ANALYSIS_KEY, "analysis", |state| {
            let preferences = state
                .profile()
                .get("learning_preferences")
                .cloned()
                .unwrap_or_else(|| json!({}));
            Ok(AgentPromptTemplate::situation_analysis(
                &Value::Object(state.profile().clone()),
                &preferences,
                state.latest_request(),
            ))
        });

        let guidance = Stage::new("guidance_synthesis", GUIDANCE_KEY, "advice", |state| {
            let analysis = prior_text(state, SITUATION_ANALYSIS_KEY, "analysis")?;
            Ok(AgentPromptTemplate::guidance_synthesis(analysis, ADVISOR_EXEMPLARS))
        });

        Self {
            pipeline: StagePipeline::new(AgentKind::Advisor, generator, vec![situation, guidance]),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.pipeline = self.pipeline.with_logger(logger);
        self
    }
}

#[async_trait]
impl Agent for AdvisorAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Advisor
    }

    async fn run(&self, state: &AcademicState) -> Result<AgentOutput, AgentError> {
        self.pipeline.run(state).await
    }
}
