//! Coordinate use case
//!
//! Decides which agents handle a request. Never fails: any text-generation
//! error becomes the default single-agent decision with the cause recorded
//! in `reasoning`.

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::text_generation::TextGenerator;
use atlas_domain::{
    AcademicState, AdvisorPlacement, ContextSummary, Document, Message, PromptTemplate,
    RoutingDecision, parse_routing_response,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A routing decision plus the raw coordinator text it was parsed from
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingOutcome {
    pub decision: RoutingDecision,
    /// `None` when the text-generation call failed
    pub response: Option<String>,
}

impl RoutingOutcome {
    /// The `coordinator_analysis` record
    pub fn to_analysis(&self) -> Document {
        self.decision.to_analysis(self.response.as_deref())
    }
}

/// Use case for routing a request to agents
pub struct Coordinator {
    generator: Arc<dyn TextGenerator>,
    placement: AdvisorPlacement,
    logger: Arc<dyn ConversationLogger>,
}

impl Coordinator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            placement: AdvisorPlacement::default(),
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_placement(mut self, placement: AdvisorPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Route `request` given the current state
    pub async fn route(&self, state: &AcademicState, request: &str) -> RoutingOutcome {
        let summary = ContextSummary::from_state(state, request);
        let prompt = PromptTemplate::coordinator(request, &summary.to_prompt_json());
        debug!(course = ?summary.course.as_ref().and_then(|c| c.get("name")), "Coordinating request");

        let outcome = match self.generator.generate(&[Message::system(prompt)], None).await {
            Ok(response) => {
                self.logger.log(ConversationEvent::generation(
                    "COORDINATOR",
                    "routing",
                    None,
                    &response,
                ));
                let decision = parse_routing_response(&response, self.placement);
                if decision.is_fallback() {
                    warn!(reason = %decision.reasoning, "Coordinator response not usable");
                }
                RoutingOutcome {
                    decision,
                    response: Some(response),
                }
            }
            Err(e) => {
                warn!("Coordinator text generation failed: {}", e);
                RoutingOutcome {
                    decision: RoutingDecision::fallback(format!("coordination error: {e}")),
                    response: None,
                }
            }
        };

        let unscheduled = outcome.decision.unscheduled_agents();
        if !unscheduled.is_empty() {
            warn!(agents = ?unscheduled, "Required agents are in no concurrent group and will not run");
        }

        info!(
            agents = ?outcome.decision.required_agents,
            groups = outcome.decision.concurrent_groups.len(),
            "Routing decided"
        );
        self.logger.log(ConversationEvent::routing(&outcome.decision));
        outcome
    }
}
