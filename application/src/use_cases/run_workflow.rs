//! Run workflow use case
//!
//! Drives one request through the fixed orchestration graph:
//!
//! ```text
//! start → coordinator → context_analysis → {agent entries} → executor ─┬→ end
//!              ▲                                                       │
//!              └──────────────── loop policy says continue ────────────┘
//! ```
//!
//! Execution is exposed as a lazy stream of [`WorkflowStep`]s; each step's
//! delta has already been merged into the [`StateStore`] when it is yielded.
//! Agent entries are dispatch markers only: the executor runs every agent
//! exactly once per pass.

use crate::config::ExecutionParams;
use crate::ports::conversation_logger::{ConversationLogger, NoConversationLogger};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::text_generation::TextGenerator;
use crate::use_cases::agents::{Agent, standard_agents};
use crate::use_cases::coordinate::Coordinator;
use crate::use_cases::execute_agents::AgentExecutor;
use atlas_domain::state::document::{nested, single};
use atlas_domain::{
    AGENT_OUTPUTS_KEY, AcademicState, AgentKind, COORDINATOR_ANALYSIS_KEY, Document, LoopPolicy,
    PROFILE_ANALYSIS_KEY, RoutingDecision, SinglePass, StateStore, WorkflowNode, WorkflowStep,
};
use futures::{Stream, StreamExt};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info};

/// Final state of a finished workflow
#[derive(Debug, Clone)]
pub struct WorkflowOutcome {
    pub state: Arc<AcademicState>,
    pub steps: Vec<WorkflowStep>,
}

impl WorkflowOutcome {
    /// The merged per-agent outputs (never empty after a completed run)
    pub fn agent_outputs(&self) -> Document {
        self.state.agent_outputs().cloned().unwrap_or_default()
    }

    /// The routing decision of the last pass
    pub fn routing(&self) -> Option<RoutingDecision> {
        self.state.routing_decision()
    }

    pub fn iterations(&self) -> usize {
        self.steps.last().map(|s| s.iteration).unwrap_or(0)
    }
}

/// Position in the graph between two yielded steps
enum Cursor {
    Coordinator {
        iteration: usize,
    },
    ContextAnalysis {
        iteration: usize,
        decision: RoutingDecision,
    },
    Dispatch {
        iteration: usize,
        decision: RoutingDecision,
        pending: VecDeque<AgentKind>,
    },
    Executor {
        iteration: usize,
        decision: RoutingDecision,
    },
    Done,
}

/// Use case wiring coordinator, agents and executor into one workflow
pub struct Orchestrator {
    coordinator: Coordinator,
    executor: AgentExecutor,
    policy: Box<dyn LoopPolicy>,
    progress: Arc<dyn ProgressNotifier>,
}

impl Orchestrator {
    pub fn new(coordinator: Coordinator, executor: AgentExecutor) -> Self {
        Self {
            coordinator,
            executor,
            policy: Box::new(SinglePass),
            progress: Arc::new(NoProgress),
        }
    }

    /// Standard wiring: one shared generator for the coordinator and the
    /// three agents, configured by `params`
    pub fn standard(
        generator: Arc<dyn TextGenerator>,
        params: &ExecutionParams,
        logger: Arc<dyn ConversationLogger>,
    ) -> Self {
        let agents: Vec<Arc<dyn Agent>> =
            standard_agents(Arc::clone(&generator), params, Arc::clone(&logger));
        let coordinator = Coordinator::new(generator)
            .with_placement(params.advisor_placement)
            .with_logger(Arc::clone(&logger));
        let executor = AgentExecutor::new(agents).with_logger(logger);

        Self::new(coordinator, executor).with_policy(params.policy.into_policy(params.max_iterations))
    }

    /// Standard wiring without transcript logging
    pub fn with_generator(generator: Arc<dyn TextGenerator>, params: &ExecutionParams) -> Self {
        Self::standard(generator, params, Arc::new(NoConversationLogger))
    }

    pub fn with_policy(mut self, policy: Box<dyn LoopPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Lazy step-by-step execution over `store`
    pub fn stream(&self, store: Arc<StateStore>) -> impl Stream<Item = WorkflowStep> + '_ {
        info!(policy = self.policy.name(), "Starting workflow");
        futures::stream::unfold(Cursor::Coordinator { iteration: 1 }, move |cursor| {
            let store = Arc::clone(&store);
            async move { self.advance(&store, cursor).await }
        })
    }

    /// Run to completion and return the final state
    pub async fn run(&self, store: Arc<StateStore>) -> WorkflowOutcome {
        let steps: Vec<WorkflowStep> = self.stream(Arc::clone(&store)).collect().await;
        WorkflowOutcome {
            state: store.snapshot(),
            steps,
        }
    }

    async fn advance(&self, store: &StateStore, cursor: Cursor) -> Option<(WorkflowStep, Cursor)> {
        let (iteration, node, delta, next) = match cursor {
            Cursor::Done => return None,

            Cursor::Coordinator { iteration } => {
                let snapshot = store.snapshot();
                let outcome = self
                    .coordinator
                    .route(&snapshot, snapshot.latest_request())
                    .await;
                self.progress.on_routing(&outcome.decision);
                let delta = single(COORDINATOR_ANALYSIS_KEY, Value::Object(outcome.to_analysis()));
                let next = Cursor::ContextAnalysis {
                    iteration,
                    decision: outcome.decision,
                };
                (iteration, WorkflowNode::Coordinator, delta, next)
            }

            Cursor::ContextAnalysis { iteration, decision } => {
                let delta = profile_analysis(&store.snapshot());
                let pending: VecDeque<AgentKind> = decision.dispatch_targets().into();
                let next = if pending.is_empty() {
                    Cursor::Executor {
                        iteration,
                        decision,
                    }
                } else {
                    Cursor::Dispatch {
                        iteration,
                        decision,
                        pending,
                    }
                };
                (iteration, WorkflowNode::ContextAnalysis, delta, next)
            }

            Cursor::Dispatch {
                iteration,
                decision,
                mut pending,
            } => {
                // Never empty: the cursor only enters Dispatch with pending agents
                let kind = pending.pop_front().unwrap_or(AgentKind::Planner);
                let next = if pending.is_empty() {
                    Cursor::Executor {
                        iteration,
                        decision,
                    }
                } else {
                    Cursor::Dispatch {
                        iteration,
                        decision,
                        pending,
                    }
                };
                (iteration, WorkflowNode::AgentEntry(kind), Document::new(), next)
            }

            Cursor::Executor { iteration, decision } => {
                let snapshot = store.snapshot();
                let outputs = self
                    .executor
                    .run_with_progress(&snapshot, &decision, self.progress.as_ref())
                    .await;
                let delta = single(AGENT_OUTPUTS_KEY, Value::Object(outputs));
                // The policy judges the state including this pass's outputs
                let after = snapshot.with_results(delta.clone());
                let next = if self.policy.should_continue(&after, iteration) {
                    info!(iteration, "Loop policy requests another coordination pass");
                    Cursor::Coordinator {
                        iteration: iteration + 1,
                    }
                } else {
                    Cursor::Done
                };
                (iteration, WorkflowNode::Executor, delta, next)
            }
        };

        store.merge(delta.clone());
        let step = WorkflowStep::new(iteration, node, delta);
        debug!(node = %step.node, iteration, "Workflow step");
        self.progress.on_step(&step);
        Some((step, next))
    }
}

/// `{profile_analysis: {analysis: {learning_style, study_patterns}}}`
fn profile_analysis(state: &AcademicState) -> Document {
    nested(
        PROFILE_ANALYSIS_KEY,
        "analysis",
        json!({
            "learning_style": state.learning_preference("learning_style"),
            "study_patterns": state.learning_preference("study_patterns"),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::text_generation::GenerationError;
    use crate::use_cases::agents::EMERGENCY_PLAN;
    use crate::use_cases::testing::ScriptedGenerator;
    use atlas_domain::{Message, UntilRequiredSatisfied, WorkflowPolicy};
    use std::sync::Mutex;

    const EXAM_REQUEST: &str = "Help me prepare for my exam tomorrow while managing a match tonight";
    const COORDINATOR: &str = "You are the coordinator";

    fn loaded_store(request: &str) -> Arc<StateStore> {
        let store = StateStore::new();
        let profile = json!({
            "id": "student_123",
            "learning_preferences": {
                "learning_style": {"visual": true},
                "study_patterns": {"peak_time": "morning"}
            }
        });
        store
            .load(
                profile.as_object().cloned().unwrap(),
                json!({"events": []}).as_object().cloned().unwrap(),
                json!({"tasks": []}).as_object().cloned().unwrap(),
            )
            .unwrap();
        store.append_message(Message::user(request));
        Arc::new(store)
    }

    fn generator(coordinator_reply: &str) -> Arc<ScriptedGenerator> {
        Arc::new(
            ScriptedGenerator::new()
                .on(COORDINATOR, coordinator_reply)
                .on("upcoming calendar events", "cal")
                .on("build a priority structure", "tasks")
                .on("You are a planning assistant", "the plan")
                .on("Decide the best note structure", "note analysis")
                .on("Write concise, high-impact study notes", "the notes")
                .on("Analyze the student's situation", "situation")
                .on("Write personalized academic guidance", "the advice"),
        )
    }

    fn nodes(steps: &[WorkflowStep]) -> Vec<&'static str> {
        steps.iter().map(|s| s.node.as_str()).collect()
    }

    #[tokio::test]
    async fn test_exam_scenario_end_to_end() {
        let generator = generator(
            "Thought: Exam tomorrow and a match tonight.\nAction: Schedule plus note support.\n\
             Observation: Both can run at once.\nDecision: PLANNER with NOTEWRITER.",
        );
        let orchestrator = Orchestrator::with_generator(generator, &ExecutionParams::default());

        let outcome = orchestrator.run(loaded_store(EXAM_REQUEST)).await;

        assert_eq!(
            nodes(&outcome.steps),
            vec!["coordinator", "context_analysis", "planner", "notewriter", "executor"]
        );
        let routing = outcome.routing().unwrap();
        assert_eq!(routing.required_agents, vec![AgentKind::Planner, AgentKind::NoteWriter]);
        assert_eq!(
            routing.concurrent_groups,
            vec![vec![AgentKind::Planner, AgentKind::NoteWriter]]
        );
        let outputs = outcome.agent_outputs();
        let mut keys: Vec<_> = outputs.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["notewriter", "planner"]);
        assert_eq!(outputs["planner"]["final_plan"]["plan"], "the plan");
        assert_eq!(outcome.iterations(), 1);
    }

    #[tokio::test]
    async fn test_context_analysis_records_profile_digest() {
        let orchestrator = Orchestrator::with_generator(
            generator("Thought: a\nAction: b\nDecision: c"),
            &ExecutionParams::default(),
        );
        let outcome = orchestrator.run(loaded_store("plan my week")).await;

        assert_eq!(
            outcome.state.result("profile_analysis"),
            Some(&json!({"analysis": {
                "learning_style": {"visual": true},
                "study_patterns": {"peak_time": "morning"}
            }}))
        );
        assert_eq!(
            outcome.state.result_text("coordinator_analysis", "response"),
            Some("Thought: a\nAction: b\nDecision: c")
        );
    }

    #[tokio::test]
    async fn test_coordinator_failure_still_produces_plan() {
        let generator = Arc::new(
            ScriptedGenerator::new()
                .fail_on(COORDINATOR, GenerationError::Timeout)
                .default_response("text"),
        );
        let orchestrator = Orchestrator::with_generator(generator, &ExecutionParams::default());
        let outcome = orchestrator.run(loaded_store("anything")).await;

        let routing = outcome.routing().unwrap();
        assert!(routing.reasoning.starts_with("Fallback"));
        assert_eq!(routing.required_agents, vec![AgentKind::Planner]);
        assert_eq!(outcome.agent_outputs()["planner"]["final_plan"]["plan"], "text");
    }

    #[tokio::test]
    async fn test_everything_failing_yields_emergency_plan() {
        let generator = Arc::new(ScriptedGenerator::failing(GenerationError::Timeout));
        let orchestrator = Orchestrator::with_generator(generator, &ExecutionParams::default());
        let outcome = orchestrator.run(loaded_store("anything")).await;

        assert_eq!(
            Value::Object(outcome.agent_outputs()),
            json!({"planner": {"plan": EMERGENCY_PLAN}})
        );
    }

    #[tokio::test]
    async fn test_stream_is_lazy_and_merges_before_yield() {
        let store = loaded_store("x");
        let orchestrator = Orchestrator::with_generator(
            generator("Thought: a\nAction: b\nDecision: c"),
            &ExecutionParams::default(),
        );
        let mut stream = std::pin::pin!(orchestrator.stream(Arc::clone(&store)));

        let first = stream.next().await.unwrap();
        assert_eq!(first.node, WorkflowNode::Coordinator);
        assert!(store.snapshot().result("coordinator_analysis").is_some());
        assert!(store.snapshot().agent_outputs().is_none());
    }

    #[tokio::test]
    async fn test_until_satisfied_reruns_coordinator() {
        // NoteWriter is required but its notes stage keeps failing
        let generator = Arc::new(
            ScriptedGenerator::new()
                .on(COORDINATOR, "Thought: a\nAction: notes\nDecision: c")
                .fail_on("Write concise, high-impact study notes", GenerationError::Timeout)
                .default_response("ok"),
        );
        let params = ExecutionParams::default().with_policy(WorkflowPolicy::UntilSatisfied, 2);
        let orchestrator = Orchestrator::with_generator(generator.clone(), &params);

        let outcome = orchestrator.run(loaded_store("x")).await;

        assert_eq!(outcome.iterations(), 2);
        assert_eq!(generator.calls_containing(COORDINATOR), 2);
        assert_eq!(
            outcome.steps.iter().filter(|s| s.node == WorkflowNode::Executor).count(),
            2
        );
    }

    #[tokio::test]
    async fn test_until_satisfied_stops_once_outputs_present() {
        let params = ExecutionParams::default();
        let orchestrator = Orchestrator::with_generator(
            generator("Thought: a\nAction: b\nDecision: c"),
            &params,
        )
        .with_policy(Box::new(UntilRequiredSatisfied { max_iterations: 5 }));

        let outcome = orchestrator.run(loaded_store("x")).await;
        assert_eq!(outcome.iterations(), 1);
    }

    #[tokio::test]
    async fn test_second_pass_analysis_replaces_first() {
        // Pass one routes to the note writer, whose notes stage fails; the
        // second coordinator call then fails and falls back to the planner
        let generator = Arc::new(
            ScriptedGenerator::new()
                .on_sequence(
                    COORDINATOR,
                    vec![
                        Ok("Thought: a\nAction: notes\nDecision: c".to_string()),
                        Err(GenerationError::Timeout),
                    ],
                )
                .fail_on("Write concise, high-impact study notes", GenerationError::Timeout)
                .default_response("ok"),
        );
        let params = ExecutionParams::default().with_policy(WorkflowPolicy::UntilSatisfied, 3);
        let orchestrator = Orchestrator::with_generator(generator.clone(), &params);

        let outcome = orchestrator.run(loaded_store("x")).await;
        assert_eq!(outcome.iterations(), 2);
        assert!(
            outcome.steps[0].delta[COORDINATOR_ANALYSIS_KEY]["priority"]["NOTEWRITER"].is_number()
        );

        let expected = RoutingDecision::fallback("coordination error: Timeout");
        assert_eq!(outcome.routing(), Some(expected.clone()));
        let analysis = outcome.state.result(COORDINATOR_ANALYSIS_KEY).unwrap();
        assert_eq!(analysis, &Value::Object(expected.to_analysis(None)));
        assert!(analysis["priority"]["NOTEWRITER"].is_null());
        assert!(analysis["response"].is_null());
    }

    /// Records every progress callback in order
    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl ProgressNotifier for Recorder {
        fn on_group_start(&self, index: usize, agents: &[AgentKind]) {
            self.events.lock().unwrap().push(format!("group {index} {agents:?}"));
        }
        fn on_agent_complete(&self, kind: AgentKind, success: bool) {
            self.events.lock().unwrap().push(format!("agent {kind} {success}"));
        }
        fn on_group_complete(&self, index: usize) {
            self.events.lock().unwrap().push(format!("done {index}"));
        }
        fn on_step(&self, step: &WorkflowStep) {
            self.events.lock().unwrap().push(format!("step {}", step.node));
        }
    }

    #[tokio::test]
    async fn test_progress_callbacks() {
        let recorder = Arc::new(Recorder::default());
        let orchestrator = Orchestrator::with_generator(
            generator("Thought: a\nAction: b\nDecision: c"),
            &ExecutionParams::default(),
        )
        .with_progress(recorder.clone());

        orchestrator.run(loaded_store("x")).await;

        assert_eq!(
            *recorder.events.lock().unwrap(),
            vec![
                "step coordinator",
                "step context_analysis",
                "step planner",
                "group 0 [Planner]",
                "agent PLANNER true",
                "done 0",
                "step executor",
            ]
        );
    }
}
