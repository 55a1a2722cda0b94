//! Deliberation request value objects

use crate::core::error::DomainError;
use crate::proposal::ProposalKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Caller-supplied context rendered into every council prompt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliberationContext {
    /// Address of the requesting user; required
    pub user_address: String,
    pub chain: Option<String>,
    /// Symbol -> balance (numeric string)
    pub balances: BTreeMap<String, String>,
    /// Symbol -> USD price
    pub prices: BTreeMap<String, f64>,
    pub notes: Option<String>,
}

impl DeliberationContext {
    pub fn new(user_address: impl Into<String>) -> Self {
        Self {
            user_address: user_address.into(),
            ..Default::default()
        }
    }

    pub fn with_chain(mut self, chain: impl Into<String>) -> Self {
        self.chain = Some(chain.into());
        self
    }

    pub fn with_balance(mut self, symbol: impl Into<String>, amount: impl Into<String>) -> Self {
        self.balances.insert(symbol.into(), amount.into());
        self
    }

    pub fn with_price(mut self, symbol: impl Into<String>, usd: f64) -> Self {
        self.prices.insert(symbol.into(), usd);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Reject contexts missing required fields
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.user_address.trim().is_empty() {
            return Err(DomainError::MissingContext("user_address"));
        }
        Ok(())
    }

    /// Render as a prompt section
    pub fn render(&self) -> String {
        let mut out = format!("User address: {}\n", self.user_address);
        if let Some(chain) = &self.chain {
            out.push_str(&format!("Chain: {}\n", chain));
        }
        if !self.balances.is_empty() {
            out.push_str("Balances:\n");
            for (symbol, amount) in &self.balances {
                out.push_str(&format!("  - {}: {}\n", symbol, amount));
            }
        }
        if !self.prices.is_empty() {
            out.push_str("Prices (USD):\n");
            for (symbol, price) in &self.prices {
                out.push_str(&format!("  - {}: {}\n", symbol, price));
            }
        }
        if let Some(notes) = &self.notes {
            out.push_str(&format!("Notes: {}\n", notes));
        }
        out
    }
}

/// One deliberation request
#[derive(Debug, Clone, PartialEq)]
pub struct DeliberationRequest {
    /// Raw user text; sanitized before use
    pub prompt: String,
    pub context: DeliberationContext,
    /// Optional third-party agent to try before the local council
    pub delegate_endpoint: Option<String>,
    /// Expected proposal variant; follows the detected intent when absent
    pub kind: Option<ProposalKind>,
}

impl DeliberationRequest {
    pub fn new(prompt: impl Into<String>, context: DeliberationContext) -> Self {
        Self {
            prompt: prompt.into(),
            context,
            delegate_endpoint: None,
            kind: None,
        }
    }

    pub fn with_delegate(mut self, endpoint: impl Into<String>) -> Self {
        self.delegate_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_kind(mut self, kind: ProposalKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_user_address() {
        assert_eq!(
            DeliberationContext::default().validate(),
            Err(DomainError::MissingContext("user_address"))
        );
        assert!(DeliberationContext::new("  ").validate().is_err());
        assert!(DeliberationContext::new("0xabc").validate().is_ok());
    }

    #[test]
    fn test_render_is_ordered() {
        let ctx = DeliberationContext::new("0xabc")
            .with_chain("base")
            .with_balance("USDC", "250")
            .with_balance("ETH", "0.4")
            .with_price("ETH", 3200.0);
        let rendered = ctx.render();
        assert!(rendered.starts_with("User address: 0xabc\nChain: base\n"));
        // BTreeMap ordering keeps prompts deterministic
        let eth = rendered.find("ETH: 0.4").unwrap();
        let usdc = rendered.find("USDC: 250").unwrap();
        assert!(eth < usdc);
        assert!(rendered.contains("ETH: 3200"));
    }

    #[test]
    fn test_context_deserializes_camel_case() {
        let ctx: DeliberationContext =
            serde_json::from_str(r#"{"userAddress":"0x1","balances":{"DAI":"5"}}"#).unwrap();
        assert_eq!(ctx.user_address, "0x1");
        assert_eq!(ctx.balances.get("DAI").map(String::as_str), Some("5"));
    }
}
