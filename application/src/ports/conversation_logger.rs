//! Port for the request transcript.
//!
//! [`ConversationLogger`] records what happened to a request (every
//! text-generation call, the routing decision, agent failures, fallbacks) as
//! machine-readable events. Diagnostic messages stay with `tracing`.

use atlas_domain::{AgentKind, RoutingDecision};
use serde_json::{Value, json};

/// A structured transcript event.
///
/// The adapter stamps the UTC time when the event is written.
pub struct ConversationEvent {
    /// Event type identifier (e.g. "generation", "routing_decision")
    pub event_type: &'static str,
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    /// One text-generation call made on behalf of `caller`
    pub fn generation(caller: &str, stage: &str, temperature: Option<f32>, response: &str) -> Self {
        Self::new(
            "generation",
            json!({
                "caller": caller,
                "stage": stage,
                "temperature": temperature,
                "response": response,
            }),
        )
    }

    pub fn routing(decision: &RoutingDecision) -> Self {
        Self::new(
            "routing_decision",
            json!({
                "required_agents": decision.required_agents,
                "concurrent_groups": decision.concurrent_groups,
                "reasoning": decision.reasoning,
            }),
        )
    }

    pub fn agent_failed(kind: AgentKind, error: &str) -> Self {
        Self::new("agent_failed", json!({"agent": kind, "error": error}))
    }

    pub fn fallback(reason: &str) -> Self {
        Self::new("fallback", json!({"reason": reason}))
    }
}

/// Port for logging transcript events.
///
/// Synchronous and infallible: a logging problem must never disturb the
/// request being processed.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
