//! Use cases for the application layer

pub mod agents;
pub mod coordinate;
pub mod execute_agents;
pub mod run_workflow;
pub mod start_session;

#[cfg(test)]
pub(crate) mod testing;
