//! Routing decision value object

use super::agent_kind::AgentKind;
use crate::state::document::Document;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Reasoning recorded when the coordinator falls back to defaults without an error
pub const DEFAULT_REASONING: &str = "Default coordination";

/// Where the advisor goes when the coordinator asks for it.
///
/// The advisor's prompts build on planning output, so it is never placed in
/// the first concurrent group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorPlacement {
    /// Append `[ADVISOR]` as its own group after every other group
    #[default]
    TrailingGroup,
    /// Mark the advisor required but schedule it in no group, so the executor
    /// never runs it
    Unscheduled,
}

impl std::str::FromStr for AdvisorPlacement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trailing_group" | "trailing-group" | "trailing" => Ok(Self::TrailingGroup),
            "unscheduled" => Ok(Self::Unscheduled),
            other => Err(format!("unknown advisor placement: {other}")),
        }
    }
}

/// Output of the coordinator (Value Object)
///
/// Created once per request and never mutated after the executor receives it.
/// `priority` is informational; execution order comes only from
/// `concurrent_groups`, which run in list order with every member of a group
/// running in parallel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub required_agents: Vec<AgentKind>,
    /// Agents recorded with a `null` priority in the analysis record are absent
    #[serde(deserialize_with = "priority_without_nulls")]
    pub priority: BTreeMap<AgentKind, u32>,
    pub concurrent_groups: Vec<Vec<AgentKind>>,
    pub reasoning: String,
}

impl Default for RoutingDecision {
    fn default() -> Self {
        Self {
            required_agents: vec![AgentKind::Planner],
            priority: BTreeMap::from([(AgentKind::Planner, 1)]),
            concurrent_groups: vec![vec![AgentKind::Planner]],
            reasoning: DEFAULT_REASONING.to_string(),
        }
    }
}

impl RoutingDecision {
    /// The default single-agent decision with the cause recorded in `reasoning`
    pub fn fallback(cause: impl std::fmt::Display) -> Self {
        Self {
            reasoning: format!("Fallback due to {cause}"),
            ..Self::default()
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.reasoning.starts_with("Fallback")
    }

    pub fn requires(&self, kind: AgentKind) -> bool {
        self.required_agents.contains(&kind)
    }

    /// Add an agent to the required set (no duplicates) with its priority
    pub fn require(&mut self, kind: AgentKind, priority: u32) {
        if !self.requires(kind) {
            self.required_agents.push(kind);
        }
        self.priority.insert(kind, priority);
    }

    /// Agents of `group` that are required, in group order
    pub fn selected_in_group(&self, group: &[AgentKind]) -> Vec<AgentKind> {
        group
            .iter()
            .copied()
            .filter(|kind| self.requires(*kind))
            .collect()
    }

    /// Required agents that appear in no concurrent group
    pub fn unscheduled_agents(&self) -> Vec<AgentKind> {
        self.required_agents
            .iter()
            .copied()
            .filter(|kind| !self.concurrent_groups.iter().any(|g| g.contains(kind)))
            .collect()
    }

    /// Agents the orchestrator fans out to after context analysis.
    ///
    /// All required agents are directly reachable; an empty set falls back
    /// to the planner alone.
    pub fn dispatch_targets(&self) -> Vec<AgentKind> {
        if self.required_agents.is_empty() {
            vec![AgentKind::Planner]
        } else {
            self.required_agents.clone()
        }
    }

    /// Restore the non-empty invariant on `required_agents`
    pub fn normalized(self) -> Self {
        if self.required_agents.is_empty() {
            Self {
                reasoning: self.reasoning,
                ..Self::default()
            }
        } else {
            self
        }
    }

    /// Render as the `coordinator_analysis` result document.
    ///
    /// Every key is always present (`null` for an unprioritized agent or a
    /// missing response), so merging a later pass's record over an earlier
    /// one overwrites it completely.
    pub fn to_analysis(&self, response: Option<&str>) -> Document {
        let mut doc = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Document::new(),
        };
        let priority: Document = AgentKind::ALL
            .iter()
            .map(|kind| {
                let value = self.priority.get(kind).map_or(Value::Null, |p| json!(p));
                (kind.as_str().to_string(), value)
            })
            .collect();
        doc.insert("priority".to_string(), Value::Object(priority));
        doc.insert("response".to_string(), json!(response));
        doc
    }
}

fn priority_without_nulls<'de, D>(deserializer: D) -> Result<BTreeMap<AgentKind, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<AgentKind, Option<u32>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(kind, priority)| priority.map(|p| (kind, p)))
        .collect())
}
