//! Canned completion gateway
//!
//! Deterministic stand-in for the live backend, used for tests and offline
//! runs. Replies depend only on the persona role and the request text, so
//! identical requests always produce identical transcripts.

use async_trait::async_trait;
use council_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use council_domain::{AgentPersona, RoleTag};
use serde_json::json;

/// Phrases that make the canned Risk Sentinel veto
const RECKLESS_PHRASES: &[&str] = &["all in", "all-in", "leverage", "entire balance", "everything"];

#[derive(Debug, Default)]
pub struct CannedGateway;

impl CannedGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LlmGateway for CannedGateway {
    async fn create_session(
        &self,
        persona: &AgentPersona,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(CannedSession {
            persona_id: persona.id.to_string(),
            role: persona.role,
        }))
    }

    fn backend_name(&self) -> &str {
        "canned"
    }
}

pub struct CannedSession {
    persona_id: String,
    role: RoleTag,
}

#[async_trait]
impl LlmSession for CannedSession {
    fn persona_id(&self) -> &str {
        &self.persona_id
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        Ok(canned_reply(self.role, content))
    }
}

fn canned_reply(role: RoleTag, content: &str) -> String {
    let lowered = content.to_lowercase();
    let reply = match role {
        RoleTag::Alpha => json!({
            "opinion": "SUPPORT",
            "reasoning": "Liquidity on the major pairs is deep and momentum favours acting now. A modest position captures the move without chasing it.",
            "confidence": 78,
            "suggestedStrategy": "swap"
        }),
        RoleTag::Risk if RECKLESS_PHRASES.iter().any(|p| lowered.contains(p)) => json!({
            "opinion": "OPPOSE",
            "reasoning": "VETO. Committing the whole position or borrowing against it leaves no margin for slippage or a sharp reversal.",
            "confidence": 90,
            "suggestedStrategy": "hold"
        }),
        RoleTag::Risk => json!({
            "opinion": "SUPPORT",
            "reasoning": "Acceptable if slippage stays under 0.5% and the size remains a small share of the balance.",
            "confidence": 64,
            "suggestedStrategy": "swap"
        }),
        RoleTag::Macro => json!({
            "opinion": "SUPPORT",
            "reasoning": "Volatility is moderate and funding is neutral. Conditions do not argue for waiting, but they do argue for staging entries.",
            "confidence": 58,
            "suggestedStrategy": "dca"
        }),
        RoleTag::Devil => json!({
            "opinion": "OPPOSE",
            "reasoning": "The bullish case rests on recent momentum alone. Crowded positioning can unwind quickly and nobody has priced that in.",
            "confidence": 55,
            "suggestedStrategy": "hold"
        }),
        RoleTag::Clerk if content.contains("VETO") => json!({
            "action": "hold",
            "tokenIn": "USDC",
            "tokenOut": "ETH",
            "amountIn": "0",
            "expectedAmountOut": "0",
            "maxSlippageBps": 50,
            "reasoning": "Risk Sentinel vetoed the request, so the council stands aside.",
            "confidence": 80,
            "riskLevel": "high"
        }),
        RoleTag::Clerk => json!({
            "action": "swap",
            "tokenIn": "USDC",
            "tokenOut": "ETH",
            "amountIn": "100",
            "expectedAmountOut": "0.03",
            "maxSlippageBps": 50,
            "tokenName": "Council Token",
            "tokenSymbol": "CNCL",
            "tokenDescription": "Community token launched by council decision.",
            "vaultPct": 10,
            "lockupDays": 30,
            "reasoning": "The council leans toward a small swap with tight slippage; the skeptic's crowding concern argues for keeping size modest.",
            "confidence": 66,
            "riskLevel": "medium"
        }),
        RoleTag::ExternalDelegate => json!({
            "opinion": "NEUTRAL",
            "reasoning": "No opinion.",
            "confidence": 50
        }),
    };
    reply.to_string()
}
