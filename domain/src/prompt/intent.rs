//! Intent classifier
//!
//! Keyword-family matching over the sanitized prompt. A detected intent is
//! later used to override the clerk's chosen strategy, so rule-based
//! determinism wins over generative output unless the risk persona vetoed.
//!
//! Families are checked in precedence order:
//!
//! | Family | Example phrases | Strategy |
//! |--------|-----------------|----------|
//! | Token launch | "launch a token", "create my own memecoin" | `token_launch` |
//! | Liquidity | "add liquidity", "LP position" | `swap` (LP is not offered) |
//! | DCA | "dca", "dollar cost average", "every week" | `dca` |
//! | Swap | "swap", "trade", "convert", "buy", "sell" | `swap` |

use crate::proposal::Strategy;
use regex::Regex;
use std::sync::LazyLock;

/// Keyword family that produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordFamily {
    TokenLaunch,
    Liquidity,
    Dca,
    Swap,
}

/// A detected intent and the family that triggered it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentMatch {
    pub strategy: Strategy,
    pub family: KeywordFamily,
}

impl IntentMatch {
    /// Whether liquidity vocabulary was redirected to a swap
    pub fn is_redirected(&self) -> bool {
        self.family == KeywordFamily::Liquidity
    }
}

/// A launch verb, at most three filler words, then the thing launched.
/// The `gap` group is checked separately for trade verbs.
static TOKEN_LAUNCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:launch|create|deploy|mint|issue|start)\s+(?P<gap>(?:[\w'-]+\s+){0,3}?)(?:token|coin|memecoin|meme\s*coin)s?\b|\btoken\s+launch\b",
    )
    .expect("token launch pattern is valid")
});

static TRADE_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:swap|trad|exchang|convert|buy|bought|sell|sold)\w*")
        .expect("trade verb pattern is valid")
});

static LIQUIDITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(add|provide|supply|deposit)\s+liquidity\b|\bliquidity\s+(pool|position|provision)\b|\blp\b")
        .expect("liquidity pattern is valid")
});

static DCA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bdca\b|\bdollar[\s-]cost\b|\brecurring\s+(buy|purchase)s?\b|\bevery\s+(day|week|month)\b|\b(daily|weekly|monthly)\s+(buy|purchase)s?\b",
    )
    .expect("dca pattern is valid")
});

static SWAP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:swap(?:s|ped|ping)?|trad(?:e|es|ed|ing)|exchang(?:e|es|ed|ing)|convert(?:s|ed|ing)?|buy(?:s|ing)?|sell(?:s|ing)?)\b",
    )
    .expect("swap pattern is valid")
});

/// Whether the prompt asks to launch a token rather than trade an existing one
fn is_launch_request(prompt: &str) -> bool {
    TOKEN_LAUNCH.captures_iter(prompt).any(|caps| {
        caps.name("gap")
            .is_none_or(|gap| !TRADE_VERB.is_match(gap.as_str()))
    })
}

/// Detect the user's intent, if any family matches
pub fn detect_intent(prompt: &str) -> Option<IntentMatch> {
    if is_launch_request(prompt) {
        return Some(IntentMatch {
            strategy: Strategy::TokenLaunch,
            family: KeywordFamily::TokenLaunch,
        });
    }

    let families: [(&Regex, KeywordFamily, Strategy); 3] = [
        (&*LIQUIDITY, KeywordFamily::Liquidity, Strategy::Swap),
        (&*DCA, KeywordFamily::Dca, Strategy::Dca),
        (&*SWAP, KeywordFamily::Swap, Strategy::Swap),
    ];

    families
        .into_iter()
        .find(|(pattern, _, _)| pattern.is_match(prompt))
        .map(|(_, family, strategy)| IntentMatch { strategy, family })
}
