//! Planner agent: calendar analysis → task analysis → plan synthesis

use super::error::AgentError;
use super::output::AgentOutput;
use super::pipeline::{Clock, Stage, StagePipeline, system_clock};
use super::Agent;
use crate::config::ExecutionParams;
use crate::ports::conversation_logger::ConversationLogger;
use crate::ports::text_generation::TextGenerator;
use async_trait::async_trait;
use atlas_domain::context::filter_upcoming_events;
use atlas_domain::prompt::exemplars::PLANNER_EXEMPLARS;
use atlas_domain::{AcademicState, AgentKind, AgentPromptTemplate, PROFILE_ANALYSIS_KEY};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::warn;

pub const CALENDAR_ANALYSIS_KEY: &str = "calendar_analysis";
pub const TASK_ANALYSIS_KEY: &str = "task_analysis";
pub const FINAL_PLAN_KEY: &str = "final_plan";

/// Scheduling and time management
pub struct PlannerAgent {
    pipeline: StagePipeline,
}

impl PlannerAgent {
    pub fn new(generator: Arc<dyn TextGenerator>, params: &ExecutionParams) -> Self {
        Self::with_clock(generator, params, system_clock())
    }

    pub fn with_clock(
        generator: Arc<dyn TextGenerator>,
        params: &ExecutionParams,
        clock: Clock,
    ) -> Self {
        let window_days = params.event_window_days;

        let calendar = Stage::new("calendar_analysis", CALENDAR_ANALYSIS_KEY, "analysis", move |state| {
            let filtered = filter_upcoming_events(state.events(), clock(), window_days);
            for skipped in &filtered.skipped {
                warn!(index = skipped.index, error = %skipped.error, "Skipping malformed calendar event");
            }
            Ok(AgentPromptTemplate::calendar_analysis(&filtered.kept))
        });

        let tasks = Stage::new("task_analysis", TASK_ANALYSIS_KEY, "analysis", |state| {
            Ok(AgentPromptTemplate::task_analysis(state.task_list()))
        });

        let plan = Stage::new("plan_synthesis", FINAL_PLAN_KEY, "plan", |state| {
            Ok(AgentPromptTemplate::plan_synthesis(
                &result_or_empty(state, PROFILE_ANALYSIS_KEY),
                &result_or_empty(state, CALENDAR_ANALYSIS_KEY),
                &result_or_empty(state, TASK_ANALYSIS_KEY),
                PLANNER_EXEMPLARS,
                state.latest_request(),
            ))
        })
        .with_temperature(params.synthesis_temperature);

        Self {
            pipeline: StagePipeline::new(AgentKind::Planner, generator, vec![calendar, tasks, plan]),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.pipeline = self.pipeline.with_logger(logger);
        self
    }
}

fn result_or_empty(state: &AcademicState, key: &str) -> Value {
    state.result(key).cloned().unwrap_or_else(|| json!({}))
}

#[async_trait]
impl Agent for PlannerAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Planner
    }

    async fn run(&self, state: &AcademicState) -> Result<AgentOutput, AgentError> {
        self.pipeline.run(state).await
    }
}
