//! Execute agents use case
//!
//! Runs the agents chosen by the coordinator group by group:
//!
//! ```text
//! groups: [[PLANNER, NOTEWRITER], [ADVISOR]]
//!
//!   snapshot₀ ─┬─ PLANNER ────┐
//!              └─ NOTEWRITER ─┴─ merge ─▶ agent_outputs ─▶ snapshot₁ ── ADVISOR ── merge
//! ```
//!
//! Agents of one group share the snapshot taken at group start and never see
//! each other's output. A failing agent contributes nothing and does not
//! affect its siblings. If nothing succeeds, the planner runs once more as a
//! last resort, and failing that the emergency plan is returned.

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::agents::{Agent, AgentError, AgentOutput, emergency_outputs};
use atlas_domain::state::document::single;
use atlas_domain::{AGENT_OUTPUTS_KEY, AcademicState, AgentKind, Document, RoutingDecision, merge};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::task::{self, JoinSet};
use tracing::{error, info, warn};

/// Use case for running agents by concurrent group
pub struct AgentExecutor {
    agents: BTreeMap<AgentKind, Arc<dyn Agent>>,
    logger: Arc<dyn ConversationLogger>,
}

impl AgentExecutor {
    pub fn new(agents: impl IntoIterator<Item = Arc<dyn Agent>>) -> Self {
        Self {
            agents: agents.into_iter().map(|a| (a.kind(), a)).collect(),
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn is_registered(&self, kind: AgentKind) -> bool {
        self.agents.contains_key(&kind)
    }

    /// Execute with default (no-op) progress
    pub async fn run(&self, state: &AcademicState, decision: &RoutingDecision) -> Document {
        self.run_with_progress(state, decision, &NoProgress).await
    }

    /// Execute every group and return the merged `agent_outputs` mapping.
    ///
    /// Always returns at least one entry.
    pub async fn run_with_progress(
        &self,
        state: &AcademicState,
        decision: &RoutingDecision,
        progress: &dyn ProgressNotifier,
    ) -> Document {
        let mut outputs = Document::new();

        for (index, group) in decision.concurrent_groups.iter().enumerate() {
            let selected = self.select(decision, group);
            if selected.is_empty() {
                continue;
            }

            info!(group = index, agents = ?selected, "Starting concurrent group");
            progress.on_group_start(index, &selected);

            let snapshot = Arc::new(snapshot_with_outputs(state, &outputs));
            for entry in self.run_group(&selected, snapshot, progress).await {
                merge(&mut outputs, entry);
            }

            progress.on_group_complete(index);
        }

        if outputs.is_empty() {
            outputs = self.last_resort(state, progress).await;
        }

        outputs
    }

    /// Required, registered agents of `group`, in group order without repeats
    fn select(&self, decision: &RoutingDecision, group: &[AgentKind]) -> Vec<AgentKind> {
        let mut selected = Vec::new();
        for kind in decision.selected_in_group(group) {
            if !self.is_registered(kind) {
                warn!(agent = %kind, "Agent is not registered; skipping");
                continue;
            }
            if !selected.contains(&kind) {
                selected.push(kind);
            }
        }
        selected
    }

    /// Run one group concurrently; returns successful entries in group order
    async fn run_group(
        &self,
        selected: &[AgentKind],
        snapshot: Arc<AcademicState>,
        progress: &dyn ProgressNotifier,
    ) -> Vec<Document> {
        let mut join_set = JoinSet::new();
        let mut spawned: HashMap<task::Id, AgentKind> = HashMap::new();

        for (position, kind) in selected.iter().enumerate() {
            let Some(agent) = self.agents.get(kind).map(Arc::clone) else {
                continue;
            };
            let snapshot = Arc::clone(&snapshot);
            let handle = join_set.spawn(async move {
                let result = agent.run(&snapshot).await;
                (position, result)
            });
            spawned.insert(handle.id(), *kind);
        }

        let mut succeeded: Vec<(usize, AgentOutput)> = Vec::new();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((position, Ok(output))) => {
                    info!(agent = %output.kind(), "Agent completed");
                    progress.on_agent_complete(output.kind(), true);
                    succeeded.push((position, output));
                }
                Ok((_, Err(e))) => {
                    self.report_failure(&e);
                    progress.on_agent_complete(e.agent(), false);
                }
                Err(e) => match spawned.get(&e.id()) {
                    Some(&kind) => {
                        warn!(agent = %kind, "Agent task aborted: {}", e);
                        self.logger
                            .log(ConversationEvent::agent_failed(kind, &e.to_string()));
                        progress.on_agent_complete(kind, false);
                    }
                    None => warn!("Task join error: {}", e),
                },
            }
        }

        succeeded.sort_by_key(|(position, _)| *position);
        succeeded
            .into_iter()
            .map(|(_, output)| output.into_entry())
            .collect()
    }

    /// One planner invocation, then the static emergency plan
    async fn last_resort(&self, state: &AcademicState, progress: &dyn ProgressNotifier) -> Document {
        let reason = "no agent produced output; running planner as last resort";
        warn!("{}", reason);
        self.logger.log(ConversationEvent::fallback(reason));
        progress.on_fallback(reason);

        if let Some(planner) = self.agents.get(&AgentKind::Planner) {
            match planner.run(state).await {
                Ok(output) => {
                    progress.on_agent_complete(AgentKind::Planner, true);
                    return output.into_entry();
                }
                Err(e) => {
                    self.report_failure(&e);
                    progress.on_agent_complete(AgentKind::Planner, false);
                }
            }
        }

        let reason = "last-resort planner failed; returning emergency plan";
        error!("{}", reason);
        self.logger.log(ConversationEvent::fallback(reason));
        progress.on_fallback(reason);
        emergency_outputs()
    }

    fn report_failure(&self, e: &AgentError) {
        warn!(agent = %e.agent(), stage = e.stage(), "Agent failed: {}", e);
        self.logger
            .log(ConversationEvent::agent_failed(e.agent(), &e.to_string()));
    }
}

fn snapshot_with_outputs(state: &AcademicState, outputs: &Document) -> AcademicState {
    if outputs.is_empty() {
        state.clone()
    } else {
        state.with_results(single(AGENT_OUTPUTS_KEY, Value::Object(outputs.clone())))
    }
}
