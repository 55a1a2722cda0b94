//! Field-level validators
//!
//! Every value returned by a completion backend or an external agent passes
//! through these before it is trusted. Invalid values are replaced with a
//! fixed default rather than rejected, so validation never fails.

use crate::council::Opinion;
use crate::proposal::{RiskLevel, Strategy, TokenSide, known_token};
use serde_json::Value;

pub const DEFAULT_CONFIDENCE: u8 = 50;
/// Upper bound for any amount field (dimensionless)
pub const MAX_AMOUNT: f64 = 1_000_000.0;
pub const DEFAULT_SLIPPAGE_BPS: u32 = 50;
pub const MAX_SLIPPAGE_BPS: u32 = 1_000;

/// Integer view of a JSON number; floats are accepted only without a fraction
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        _ => None,
    }
}

/// One of the four opinions, otherwise `NEUTRAL`
pub fn validate_opinion(value: Option<&Value>) -> Opinion {
    value
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or(Opinion::Neutral)
}

/// Integer in `0..=100`, otherwise 50
pub fn validate_confidence(value: Option<&Value>) -> u8 {
    value
        .and_then(as_integer)
        .filter(|n| (0..=100).contains(n))
        .map(|n| n as u8)
        .unwrap_or(DEFAULT_CONFIDENCE)
}

/// Amount as a numeric string; `"0"` unless finite, positive and `<= MAX_AMOUNT`
pub fn validate_amount(value: Option<&Value>) -> String {
    let parsed = match value {
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    };
    match parsed {
        Some(amount) if amount.is_finite() && amount > 0.0 && amount <= MAX_AMOUNT => {
            amount.to_string()
        }
        _ => "0".to_string(),
    }
}

/// Known token symbol, otherwise the default for `side`
pub fn validate_token(value: Option<&Value>, side: TokenSide) -> String {
    value
        .and_then(Value::as_str)
        .and_then(known_token)
        .unwrap_or(side.default_symbol())
        .to_string()
}

/// Validate both sides of a pair and keep them distinct
pub fn validate_pair(token_in: Option<&Value>, token_out: Option<&Value>) -> (String, String) {
    let token_in = validate_token(token_in, TokenSide::In);
    let mut token_out = validate_token(token_out, TokenSide::Out);
    if token_in == token_out {
        token_out = if token_in == TokenSide::Out.default_symbol() {
            TokenSide::In.default_symbol().to_string()
        } else {
            TokenSide::Out.default_symbol().to_string()
        };
    }
    (token_in, token_out)
}

/// `low` / `medium` / `high`, otherwise `medium`
pub fn validate_risk_level(value: Option<&Value>) -> RiskLevel {
    value
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

/// Integer in `1..=MAX_SLIPPAGE_BPS`, otherwise the default
pub fn validate_slippage_bps(value: Option<&Value>) -> u32 {
    value
        .and_then(as_integer)
        .filter(|n| (1..=MAX_SLIPPAGE_BPS as i64).contains(n))
        .map(|n| n as u32)
        .unwrap_or(DEFAULT_SLIPPAGE_BPS)
}

pub fn validate_strategy(value: Option<&Value>) -> Option<Strategy> {
    value.and_then(Value::as_str).and_then(|s| s.parse().ok())
}

/// Integer within `range`, otherwise `default`
pub fn validate_bounded_integer(
    value: Option<&Value>,
    range: std::ops::RangeInclusive<i64>,
    default: i64,
) -> i64 {
    value
        .and_then(as_integer)
        .filter(|n| range.contains(n))
        .unwrap_or(default)
}

/// Trimmed text without control characters, capped at `max_chars`
pub fn validate_text(value: Option<&Value>, max_chars: usize) -> Option<String> {
    let text: String = value?
        .as_str()?
        .chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .collect();
    let text = crate::core::string::take_chars(text.trim(), max_chars);
    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_opinion() {
        assert_eq!(validate_opinion(Some(&json!("SUPPORT"))), Opinion::Support);
        assert_eq!(validate_opinion(Some(&json!("concern"))), Opinion::Concern);
        assert_eq!(validate_opinion(Some(&json!("STRONG_BUY"))), Opinion::Neutral);
        assert_eq!(validate_opinion(Some(&json!(1))), Opinion::Neutral);
        assert_eq!(validate_opinion(None), Opinion::Neutral);
    }

    #[test]
    fn test_confidence() {
        assert_eq!(validate_confidence(Some(&json!(85))), 85);
        assert_eq!(validate_confidence(Some(&json!(0))), 0);
        assert_eq!(validate_confidence(Some(&json!(100))), 100);
        assert_eq!(validate_confidence(Some(&json!(70.0))), 70);
        assert_eq!(validate_confidence(Some(&json!(150))), 50);
        assert_eq!(validate_confidence(Some(&json!(-3))), 50);
        assert_eq!(validate_confidence(Some(&json!(72.5))), 50);
        assert_eq!(validate_confidence(Some(&json!("90"))), 50);
        assert_eq!(validate_confidence(None), 50);
    }

    #[test]
    fn test_amount() {
        assert_eq!(validate_amount(Some(&json!("250"))), "250");
        assert_eq!(validate_amount(Some(&json!(0.5))), "0.5");
        assert_eq!(validate_amount(Some(&json!(" 1000000 "))), "1000000");
        assert_eq!(validate_amount(Some(&json!("1000000.01"))), "0");
        assert_eq!(validate_amount(Some(&json!("-5"))), "0");
        assert_eq!(validate_amount(Some(&json!("0"))), "0");
        assert_eq!(validate_amount(Some(&json!("NaN"))), "0");
        assert_eq!(validate_amount(Some(&json!("inf"))), "0");
        assert_eq!(validate_amount(Some(&json!("lots"))), "0");
        assert_eq!(validate_amount(None), "0");
    }

    #[test]
    fn test_token() {
        assert_eq!(validate_token(Some(&json!("weth")), TokenSide::In), "WETH");
        assert_eq!(validate_token(Some(&json!("SCAM")), TokenSide::In), "USDC");
        assert_eq!(validate_token(Some(&json!("SCAM")), TokenSide::Out), "ETH");
        assert_eq!(validate_token(None, TokenSide::Out), "ETH");
    }

    #[test]
    fn test_pair_never_identical() {
        assert_eq!(
            validate_pair(Some(&json!("ETH")), Some(&json!("ETH"))),
            ("ETH".to_string(), "USDC".to_string())
        );
        assert_eq!(
            validate_pair(Some(&json!("DAI")), Some(&json!("dai"))),
            ("DAI".to_string(), "ETH".to_string())
        );
        // Both unknown: side defaults already differ
        assert_eq!(
            validate_pair(Some(&json!("X")), Some(&json!("Y"))),
            ("USDC".to_string(), "ETH".to_string())
        );
    }

    #[test]
    fn test_risk_level() {
        assert_eq!(validate_risk_level(Some(&json!("low"))), RiskLevel::Low);
        assert_eq!(validate_risk_level(Some(&json!("HIGH"))), RiskLevel::High);
        assert_eq!(validate_risk_level(Some(&json!("critical"))), RiskLevel::Medium);
        assert_eq!(validate_risk_level(None), RiskLevel::Medium);
    }

    #[test]
    fn test_slippage() {
        assert_eq!(validate_slippage_bps(Some(&json!(30))), 30);
        assert_eq!(validate_slippage_bps(Some(&json!(0))), 50);
        assert_eq!(validate_slippage_bps(Some(&json!(5000))), 50);
    }

    #[test]
    fn test_text() {
        assert_eq!(
            validate_text(Some(&json!("  hello\u{0007} ")), 10).as_deref(),
            Some("hello")
        );
        assert_eq!(validate_text(Some(&json!("abcdef")), 3).as_deref(), Some("abc"));
        assert!(validate_text(Some(&json!("   ")), 10).is_none());
        assert!(validate_text(Some(&json!(5)), 10).is_none());
    }

    #[test]
    fn test_bounded_integer() {
        assert_eq!(validate_bounded_integer(Some(&json!(20)), 0..=100, 10), 20);
        assert_eq!(validate_bounded_integer(Some(&json!(101)), 0..=100, 10), 10);
        assert_eq!(validate_bounded_integer(None, 0..=365, 30), 30);
    }
}
