//! Known token set
//!
//! Trade proposals may only reference these symbols. Anything else coming
//! back from a backend is replaced with the side-specific default.

/// Symbols a trade proposal may reference
pub const KNOWN_TOKENS: &[&str] = &["ETH", "WETH", "USDC", "USDT", "DAI", "WBTC"];

pub const DEFAULT_TOKEN_IN: &str = "USDC";
pub const DEFAULT_TOKEN_OUT: &str = "ETH";

/// Which side of a pair a symbol sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSide {
    In,
    Out,
}

impl TokenSide {
    pub fn default_symbol(&self) -> &'static str {
        match self {
            TokenSide::In => DEFAULT_TOKEN_IN,
            TokenSide::Out => DEFAULT_TOKEN_OUT,
        }
    }
}

/// Canonical symbol if `symbol` is in the known set (case-insensitive)
pub fn known_token(symbol: &str) -> Option<&'static str> {
    let symbol = symbol.trim();
    KNOWN_TOKENS
        .iter()
        .copied()
        .find(|t| t.eq_ignore_ascii_case(symbol))
}
