//! Prompt templates for the council flow

use crate::council::{AgentPersona, CouncilMessage};
use crate::deliberation::DeliberationContext;
use crate::proposal::{KNOWN_TOKENS, ProposalKind, Strategy};

/// Templates for generating prompts at each stage
pub struct CouncilPromptTemplate;

impl CouncilPromptTemplate {
    /// Prompt for one debating persona's turn
    pub fn persona_turn(
        persona: &AgentPersona,
        request: &str,
        context: &DeliberationContext,
        transcript: &[CouncilMessage],
        intent: Option<Strategy>,
    ) -> String {
        let mut prompt = format!(
            "You are speaking as {} in the council.\n\n## User request\n{}\n\n## Context\n{}\n",
            persona.display_name,
            request,
            context.render()
        );

        prompt.push_str(&Self::transcript_section(transcript));

        if let Some(strategy) = intent {
            prompt.push_str(&format!(
                "\n## Detected intent\nThe user's intent is `{}`. Your suggestedStrategy must be `{}` unless a veto exists.\n",
                strategy, strategy
            ));
        }

        prompt.push_str(
            r#"
Respond with a single JSON object and nothing else:
{"opinion": "SUPPORT" | "CONCERN" | "OPPOSE" | "NEUTRAL", "reasoning": "<2-4 sentences>", "confidence": <integer 0-100>, "suggestedStrategy": "swap" | "dca" | "token_launch" | "hold"}"#,
        );

        prompt
    }

    /// Prompt for the clerk's synthesis
    pub fn synthesis(
        request: &str,
        context: &DeliberationContext,
        transcript: &[CouncilMessage],
        intent: Option<Strategy>,
        kind: ProposalKind,
    ) -> String {
        let mut prompt = format!(
            "Record the council's decision.\n\n## User request\n{}\n\n## Context\n{}\n",
            request,
            context.render()
        );

        prompt.push_str(&Self::transcript_section(transcript));

        if let Some(strategy) = intent {
            prompt.push_str(&format!(
                "\n## Detected intent\n`{}`. The action must match it unless Risk Sentinel vetoed.\n",
                strategy
            ));
        }

        prompt.push_str(&format!("\nExpected proposal type: `{}`.\n", kind));
        prompt.push_str(&format!(
            "Allowed trade tokens: {}.\n",
            KNOWN_TOKENS.join(", ")
        ));

        prompt.push_str(
            r#"
Respond with a single JSON object and nothing else:
{"action": "swap" | "dca" | "token_launch" | "hold",
 "tokenIn": "<symbol>", "tokenOut": "<symbol>", "amountIn": "<number>", "expectedAmountOut": "<number>",
 "maxSlippageBps": <integer 1-1000>,
 "tokenName": "<name>", "tokenSymbol": "<2-8 letters>", "tokenDescription": "<one sentence>",
 "vaultPct": <integer 0-100>, "lockupDays": <integer 0-365>,
 "reasoning": "<summary of the debate>", "confidence": <integer 0-100>, "riskLevel": "low" | "medium" | "high"}
Include the trade fields for trades and the token fields for token launches."#,
        );

        prompt
    }

    fn transcript_section(transcript: &[CouncilMessage]) -> String {
        if transcript.is_empty() {
            return "\n## Council transcript\n(You speak first.)\n".to_string();
        }
        let mut section = String::from("\n## Council transcript\n");
        for message in transcript {
            section.push_str(&message.transcript_line());
            section.push('\n');
        }
        section
    }
}
