//! Council transcript messages

use super::persona::{AgentPersona, RoleTag};
use serde::{Deserialize, Serialize};

/// A persona's position on the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Opinion {
    Support,
    Concern,
    Oppose,
    Neutral,
}

impl Opinion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Opinion::Support => "SUPPORT",
            Opinion::Concern => "CONCERN",
            Opinion::Oppose => "OPPOSE",
            Opinion::Neutral => "NEUTRAL",
        }
    }
}

impl std::fmt::Display for Opinion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Opinion {
    type Err = ();

    /// Exact (case-insensitive) match against the four opinion labels
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUPPORT" => Ok(Opinion::Support),
            "CONCERN" => Ok(Opinion::Concern),
            "OPPOSE" => Ok(Opinion::Oppose),
            "NEUTRAL" => Ok(Opinion::Neutral),
            _ => Err(()),
        }
    }
}

/// One entry in the deliberation transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouncilMessage {
    pub agent_id: String,
    pub agent_name: String,
    pub role: RoleTag,
    pub opinion: Opinion,
    pub reasoning: String,
    /// Always within `0..=100`
    pub confidence: u8,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
}

impl CouncilMessage {
    pub fn new(
        persona: &AgentPersona,
        opinion: Opinion,
        reasoning: impl Into<String>,
        confidence: u8,
        timestamp: u64,
    ) -> Self {
        Self {
            agent_id: persona.id.to_string(),
            agent_name: persona.display_name.to_string(),
            role: persona.role,
            opinion,
            reasoning: reasoning.into(),
            confidence: confidence.min(100),
            timestamp,
        }
    }

    /// Canned abstention used when a persona fails to produce a usable reply
    pub fn fallback(persona: &AgentPersona, timestamp: u64) -> Self {
        Self::new(
            persona,
            Opinion::Neutral,
            format!(
                "{} could not deliver an opinion in time and abstains.",
                persona.display_name
            ),
            50,
            timestamp,
        )
    }

    /// Whether this message counts toward the vote tally
    pub fn is_vote(&self) -> bool {
        self.role.is_voting()
    }

    /// Render as one transcript line for downstream prompts
    pub fn transcript_line(&self) -> String {
        format!(
            "[{}] {} ({}% confidence): {}",
            self.agent_name, self.opinion, self.confidence, self.reasoning
        )
    }
}
