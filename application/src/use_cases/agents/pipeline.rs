//! Sequential stage pipeline shared by every agent.
//!
//! ```text
//! state ──stage 1──▶ {key1: {field1: text}} ──merge──▶ state' ──stage 2──▶ ...
//! ```
//!
//! Each stage builds its prompt from the latest working state, calls the text
//! generator once and stores the reply as `{key: {field: text}}`. The reply is
//! merged into a private working copy before the next stage runs; the caller's
//! state is never touched.

use super::error::AgentError;
use super::output::AgentOutput;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::text_generation::TextGenerator;
use atlas_domain::state::document::nested;
use atlas_domain::{AcademicState, AgentKind, Document, Message, merge};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Source of the current time, injectable for tests
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// The wall clock
pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

type PromptBuilder = Box<dyn Fn(&AcademicState) -> Result<Vec<Message>, String> + Send + Sync>;

/// One step of an agent pipeline
pub struct Stage {
    pub name: &'static str,
    pub key: &'static str,
    pub field: &'static str,
    pub temperature: Option<f32>,
    prompt: PromptBuilder,
}

impl Stage {
    /// `prompt` returns `Err(reason)` when the state lacks what it needs
    pub fn new(
        name: &'static str,
        key: &'static str,
        field: &'static str,
        prompt: impl Fn(&AcademicState) -> Result<Vec<Message>, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            key,
            field,
            temperature: None,
            prompt: Box::new(prompt),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Runs an agent's stages strictly in order
pub struct StagePipeline {
    kind: AgentKind,
    stages: Vec<Stage>,
    generator: Arc<dyn TextGenerator>,
    logger: Arc<dyn ConversationLogger>,
}

impl StagePipeline {
    pub fn new(kind: AgentKind, generator: Arc<dyn TextGenerator>, stages: Vec<Stage>) -> Self {
        Self {
            kind,
            stages,
            generator,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name).collect()
    }

    /// Run every stage; the first failure aborts the pipeline
    pub async fn run(&self, state: &AcademicState) -> Result<AgentOutput, AgentError> {
        let mut working = state.clone();
        let mut produced = Document::new();

        for stage in &self.stages {
            debug!(agent = %self.kind, stage = stage.name, "Running stage");

            let messages = (stage.prompt)(&working).map_err(|reason| AgentError::MalformedState {
                agent: self.kind,
                stage: stage.name,
                reason,
            })?;

            let text = self
                .generator
                .generate(&messages, stage.temperature)
                .await
                .map_err(|source| AgentError::Stage {
                    agent: self.kind,
                    stage: stage.name,
                    source,
                })?;

            self.logger.log(ConversationEvent::generation(
                self.kind.as_str(),
                stage.name,
                stage.temperature,
                &text,
            ));

            let delta = nested(stage.key, stage.field, Value::String(text));
            working.merge_results(delta.clone());
            merge(&mut produced, delta);
        }

        Ok(AgentOutput::new(self.kind, produced))
    }
}

/// `results[key][field]` as text, or the reason it is unavailable
pub fn prior_text<'a>(state: &'a AcademicState, key: &str, field: &str) -> Result<&'a str, String> {
    state
        .result_text(key, field)
        .ok_or_else(|| format!("missing results.{key}.{field}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::text_generation::GenerationError;
    use crate::use_cases::testing::ScriptedGenerator;
    use serde_json::json;

    fn two_stage(generator: Arc<ScriptedGenerator>) -> StagePipeline {
        StagePipeline::new(
            AgentKind::NoteWriter,
            generator,
            vec![
                Stage::new("first", "first_stage", "analysis", |_| {
                    Ok(vec![Message::system("FIRST")])
                }),
                Stage::new("second", "second_stage", "notes", |state| {
                    let prior = prior_text(state, "first_stage", "analysis")?;
                    Ok(vec![Message::system(format!("SECOND after {prior}"))])
                })
                .with_temperature(0.5),
            ],
        )
    }

    #[tokio::test]
    async fn test_stage_output_feeds_next_stage() {
        let generator = Arc::new(
            ScriptedGenerator::new()
                .on("FIRST", "alpha")
                .on("SECOND", "beta"),
        );
        let pipeline = two_stage(Arc::clone(&generator));

        let output = pipeline.run(&AcademicState::default()).await.unwrap();

        assert_eq!(
            Value::Object(output.results().clone()),
            json!({"first_stage": {"analysis": "alpha"}, "second_stage": {"notes": "beta"}})
        );
        assert_eq!(generator.calls_containing("SECOND after alpha"), 1);
        assert_eq!(generator.temperatures(), vec![None, Some(0.5)]);
    }

    #[tokio::test]
    async fn test_input_state_is_not_mutated_and_output_excludes_it() {
        let generator = Arc::new(ScriptedGenerator::new().default_response("ok"));
        let state =
            AcademicState::default().with_results(nested("profile_analysis", "analysis", json!({})));
        let before = state.clone();

        let output = two_stage(generator).run(&state).await.unwrap();

        assert_eq!(state, before);
        assert!(!output.results().contains_key("profile_analysis"));
    }

    #[tokio::test]
    async fn test_failure_stops_pipeline_and_names_stage() {
        let generator = Arc::new(
            ScriptedGenerator::new()
                .fail_on("FIRST", GenerationError::Timeout)
                .default_response("unused"),
        );
        let error = two_stage(Arc::clone(&generator))
            .run(&AcademicState::default())
            .await
            .unwrap_err();

        assert_eq!(error.stage(), "first");
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_state_is_reported() {
        let generator = Arc::new(ScriptedGenerator::new().default_response("x"));
        let pipeline = StagePipeline::new(
            AgentKind::Advisor,
            generator,
            vec![Stage::new("needs_prior", "k", "f", |state| {
                prior_text(state, "absent", "analysis").map(|_| vec![])
            })],
        );

        let error = pipeline.run(&AcademicState::default()).await.unwrap_err();
        assert!(matches!(error, AgentError::MalformedState { .. }));
    }
}
