//! Routing domain: which agents run, and in which concurrency groups.
//!
//! ```text
//!   coordinator text ──parse_routing_response──▶ RoutingDecision
//!                                                 ├─ required_agents
//!                                                 ├─ priority (reporting only)
//!                                                 └─ concurrent_groups: [[A, B], [C]]
//!                                                     group 0 in parallel, then group 1
//! ```

pub mod agent_kind;
pub mod decision;
pub mod parsing;

pub use agent_kind::AgentKind;
pub use decision::{AdvisorPlacement, DEFAULT_REASONING, RoutingDecision};
pub use parsing::{extract_thought, is_well_formed, parse_routing_response};
