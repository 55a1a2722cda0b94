//! Persona registry
//!
//! The council is a fixed roster of five personas. Four of them debate in
//! order; the clerk only summarizes. Personas are plain data records: every
//! behavioural difference comes from the directive text, never from dispatch.

use serde::{Deserialize, Serialize};

/// Role a persona plays in the council
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleTag {
    /// Opportunistic advocate
    Alpha,
    /// Risk reviewer with veto authority
    Risk,
    /// Neutral macro-context provider
    Macro,
    /// Adversarial skeptic
    Devil,
    /// Non-voting synthesis role
    Clerk,
    /// Synthetic role for proposals produced by an external delegate
    ExternalDelegate,
}

impl RoleTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleTag::Alpha => "alpha",
            RoleTag::Risk => "risk",
            RoleTag::Macro => "macro",
            RoleTag::Devil => "devil",
            RoleTag::Clerk => "clerk",
            RoleTag::ExternalDelegate => "external_delegate",
        }
    }

    /// Whether messages from this role count toward the vote tally
    pub fn is_voting(&self) -> bool {
        !matches!(self, RoleTag::Clerk)
    }
}

impl std::fmt::Display for RoleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A council member (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentPersona {
    pub id: &'static str,
    pub display_name: &'static str,
    pub role: RoleTag,
    pub directive: &'static str,
}

impl AgentPersona {
    pub fn is_clerk(&self) -> bool {
        self.role == RoleTag::Clerk
    }
}

const ALPHA_DIRECTIVE: &str = r#"You are Alpha Hunter, the council's opportunistic advocate.
You look for upside: momentum, mispricing, timing and asymmetric bets.
Argue for acting when the opportunity is real, and say what size and route you would use.
You must still respect what earlier council members said; address their points directly."#;

const RISK_DIRECTIVE: &str = r#"You are Risk Sentinel, the council's risk reviewer.
You hold veto authority. Examine slippage, liquidity, position size, counterparty and contract risk.
If the request is unsafe in any way that cannot be mitigated, include the word VETO in your reasoning
and explain exactly why. Otherwise, state the conditions under which you would accept it."#;

const MACRO_DIRECTIVE: &str = r#"You are Macro Oracle, the council's neutral context provider.
You do not advocate. Describe the market regime, volatility, correlations and any broader
conditions that bear on the request, and say how they should change the council's sizing."#;

const DEVIL_DIRECTIVE: &str = r#"You are Devil's Advocate, the council's adversarial skeptic.
Attack the strongest argument made so far. Look for hidden assumptions, crowded trades,
narrative risk and second-order effects. Oppose unless the case survives your scrutiny."#;

const CLERK_DIRECTIVE: &str = r#"You are Council Clerk. You do not vote and you do not debate.
You read the full transcript and record the council's decision as one structured proposal.
Reflect the weight of the arguments faithfully; a veto from Risk Sentinel must be honoured."#;

/// The ordered council roster. The last entry is the clerk.
pub static PERSONAS: [AgentPersona; 5] = [
    AgentPersona {
        id: "alpha-hunter",
        display_name: "Alpha Hunter",
        role: RoleTag::Alpha,
        directive: ALPHA_DIRECTIVE,
    },
    AgentPersona {
        id: "risk-sentinel",
        display_name: "Risk Sentinel",
        role: RoleTag::Risk,
        directive: RISK_DIRECTIVE,
    },
    AgentPersona {
        id: "macro-oracle",
        display_name: "Macro Oracle",
        role: RoleTag::Macro,
        directive: MACRO_DIRECTIVE,
    },
    AgentPersona {
        id: "devils-advocate",
        display_name: "Devil's Advocate",
        role: RoleTag::Devil,
        directive: DEVIL_DIRECTIVE,
    },
    AgentPersona {
        id: "council-clerk",
        display_name: "Council Clerk",
        role: RoleTag::Clerk,
        directive: CLERK_DIRECTIVE,
    },
];

/// Stand-in persona for proposals produced by an external agent service.
///
/// Not part of the roster; it never debates.
pub static EXTERNAL_DELEGATE: AgentPersona = AgentPersona {
    id: "external-delegate",
    display_name: "External Agent",
    role: RoleTag::ExternalDelegate,
    directive: "",
};

/// Read-only view over the persona roster
pub struct PersonaRegistry;

impl PersonaRegistry {
    /// All personas in council order
    pub fn all() -> &'static [AgentPersona] {
        &PERSONAS
    }

    /// Debating personas, in speaking order
    pub fn debaters() -> impl Iterator<Item = &'static AgentPersona> {
        PERSONAS.iter().filter(|p| !p.is_clerk())
    }

    /// The synthesis persona
    pub fn clerk() -> &'static AgentPersona {
        &PERSONAS[PERSONAS.len() - 1]
    }

    pub fn by_role(role: RoleTag) -> Option<&'static AgentPersona> {
        PERSONAS.iter().find(|p| p.role == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_order() {
        let roles: Vec<_> = PersonaRegistry::all().iter().map(|p| p.role).collect();
        assert_eq!(
            roles,
            vec![
                RoleTag::Alpha,
                RoleTag::Risk,
                RoleTag::Macro,
                RoleTag::Devil,
                RoleTag::Clerk
            ]
        );
    }

    #[test]
    fn test_debaters_exclude_clerk() {
        assert_eq!(PersonaRegistry::debaters().count(), 4);
        assert!(PersonaRegistry::debaters().all(|p| !p.is_clerk()));
        assert!(PersonaRegistry::clerk().is_clerk());
    }

    #[test]
    fn test_risk_directive_mentions_veto() {
        let risk = PersonaRegistry::by_role(RoleTag::Risk).unwrap();
        assert!(risk.directive.contains("VETO"));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = PersonaRegistry::all().iter().map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), PERSONAS.len());
    }

    #[test]
    fn test_voting_roles() {
        assert!(RoleTag::Risk.is_voting());
        assert!(RoleTag::ExternalDelegate.is_voting());
        assert!(!RoleTag::Clerk.is_voting());
    }
}
