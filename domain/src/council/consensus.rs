//! Consensus calculation
//!
//! Turns a transcript into a categorical verdict. Only voting roles count;
//! the clerk reports but never votes. A risk-persona veto overrides any tally.
//!
//! Precedence (first match wins):
//!
//! | Condition | Verdict |
//! |-----------|---------|
//! | risk persona reasoning contains "veto" (any case) | `vetoed` |
//! | `support == total` | `unanimous` |
//! | `support > total / 2` | `majority` |
//! | otherwise | `contested` |

use super::message::{CouncilMessage, Opinion};
use super::persona::RoleTag;
use serde::{Deserialize, Serialize};

/// Categorical outcome of a deliberation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Consensus {
    Unanimous,
    Majority,
    Contested,
    Vetoed,
}

impl Consensus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Consensus::Unanimous => "unanimous",
            Consensus::Majority => "majority",
            Consensus::Contested => "contested",
            Consensus::Vetoed => "vetoed",
        }
    }

    /// Classify a tally. Pure: identical inputs always give the same label.
    pub fn classify(tally: &VoteTally, vetoed: bool) -> Self {
        let total = tally.total();
        if vetoed {
            Consensus::Vetoed
        } else if tally.support == total {
            Consensus::Unanimous
        } else if tally.support as f64 > total as f64 / 2.0 {
            Consensus::Majority
        } else {
            Consensus::Contested
        }
    }
}

impl std::fmt::Display for Consensus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Vote counts over the voting messages of a transcript
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub support: usize,
    pub oppose: usize,
    /// NEUTRAL and CONCERN both count as abstentions
    pub abstain: usize,
}

impl VoteTally {
    pub fn new(support: usize, oppose: usize, abstain: usize) -> Self {
        Self {
            support,
            oppose,
            abstain,
        }
    }

    pub fn total(&self) -> usize {
        self.support + self.oppose + self.abstain
    }

    /// Count the voting messages of a transcript
    pub fn from_messages(messages: &[CouncilMessage]) -> Self {
        messages
            .iter()
            .filter(|m| m.is_vote())
            .fold(Self::default(), |mut tally, m| {
                match m.opinion {
                    Opinion::Support => tally.support += 1,
                    Opinion::Oppose => tally.oppose += 1,
                    Opinion::Neutral | Opinion::Concern => tally.abstain += 1,
                }
                tally
            })
    }

    /// Generate a visual vote summary (e.g., "[●●○·]")
    pub fn summary(&self) -> String {
        let mut s = String::from("[");
        s.extend(std::iter::repeat_n('●', self.support));
        s.extend(std::iter::repeat_n('○', self.oppose));
        s.extend(std::iter::repeat_n('·', self.abstain));
        s.push(']');
        s
    }
}

/// Whether the risk persona vetoed anywhere in the transcript
pub fn has_veto(messages: &[CouncilMessage]) -> bool {
    messages
        .iter()
        .filter(|m| m.role == RoleTag::Risk)
        .any(|m| m.reasoning.to_lowercase().contains("veto"))
}

/// Verdict computed from a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusVerdict {
    pub consensus: Consensus,
    pub vote_tally: VoteTally,
    pub vetoed: bool,
}

/// Compute the consensus verdict for a transcript
pub fn calculate_consensus(messages: &[CouncilMessage]) -> ConsensusVerdict {
    let vote_tally = VoteTally::from_messages(messages);
    let vetoed = has_veto(messages);
    ConsensusVerdict {
        consensus: Consensus::classify(&vote_tally, vetoed),
        vote_tally,
        vetoed,
    }
}
