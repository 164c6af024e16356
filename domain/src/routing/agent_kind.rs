//! Agent identifier value object

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The specialized agents the coordinator can dispatch to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgentKind {
    /// Scheduling and time management
    Planner,
    /// Study materials and content summaries
    NoteWriter,
    /// Personalized academic guidance
    Advisor,
}

impl AgentKind {
    pub const ALL: [AgentKind; 3] = [AgentKind::Planner, AgentKind::NoteWriter, AgentKind::Advisor];

    /// Upper-case identifier used in routing decisions (`"PLANNER"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Planner => "PLANNER",
            AgentKind::NoteWriter => "NOTEWRITER",
            AgentKind::Advisor => "ADVISOR",
        }
    }

    /// Lower-case key used in `agent_outputs` (`"planner"`)
    pub fn output_key(&self) -> &'static str {
        match self {
            AgentKind::Planner => "planner",
            AgentKind::NoteWriter => "notewriter",
            AgentKind::Advisor => "advisor",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AgentKind::Planner => "Planner",
            AgentKind::NoteWriter => "NoteWriter",
            AgentKind::Advisor => "Advisor",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AgentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PLANNER" => Ok(AgentKind::Planner),
            "NOTEWRITER" => Ok(AgentKind::NoteWriter),
            "ADVISOR" => Ok(AgentKind::Advisor),
            _ => Err(DomainError::UnknownAgent(s.to_string())),
        }
    }
}

impl Serialize for AgentKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AgentKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
