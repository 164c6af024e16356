//! Prompt domain
//!
//! Templates for the coordinator and for every agent stage, plus the static
//! few-shot exemplars used by the synthesis stages.

pub mod agent;
pub mod exemplars;
mod template;

pub use agent::AgentPromptTemplate;
pub use exemplars::Exemplar;
pub use template::PromptTemplate;
