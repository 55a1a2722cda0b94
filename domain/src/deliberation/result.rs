//! Deliberation result

use crate::council::{Consensus, CouncilMessage, VoteTally, calculate_consensus};
use serde::{Deserialize, Serialize};

/// Transcript and verdict of one deliberation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliberationResult {
    pub messages: Vec<CouncilMessage>,
    pub consensus: Consensus,
    pub vote_tally: VoteTally,
    /// Number of voting turns in the transcript
    pub rounds: usize,
}

impl DeliberationResult {
    /// Build a result from a finished transcript.
    ///
    /// Consensus and tally are always recomputed from the messages so the
    /// tally total equals the number of voting messages.
    pub fn from_messages(messages: Vec<CouncilMessage>) -> Self {
        let verdict = calculate_consensus(&messages);
        let rounds = messages.iter().filter(|m| m.is_vote()).count();
        Self {
            messages,
            consensus: verdict.consensus,
            vote_tally: verdict.vote_tally,
            rounds,
        }
    }

    pub fn empty() -> Self {
        Self::from_messages(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::council::{Opinion, PersonaRegistry, RoleTag};

    #[test]
    fn test_from_messages_counts_voting_rounds() {
        let alpha = PersonaRegistry::by_role(RoleTag::Alpha).unwrap();
        let clerk = PersonaRegistry::clerk();
        let result = DeliberationResult::from_messages(vec![
            CouncilMessage::new(alpha, Opinion::Support, "go", 80, 1),
            CouncilMessage::new(clerk, Opinion::Support, "recorded", 80, 2),
        ]);
        assert_eq!(result.rounds, 1);
        assert_eq!(result.vote_tally.total(), 1);
        assert_eq!(result.consensus, Consensus::Unanimous);
        assert_eq!(result.messages.len(), 2);
    }
}
