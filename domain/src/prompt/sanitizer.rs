//! Prompt sanitizer
//!
//! Hardens raw user text before it reaches any completion backend. Never
//! fails: whatever comes in, a cleaned string of at most
//! [`MAX_PROMPT_CHARS`] characters comes out.
//!
//! Steps, in order:
//!
//! 1. Drop control characters (C0, DEL, C1) except `\n` and `\t`, and
//!    invisible format characters (zero-width, bidi overrides, BOM).
//! 2. Trim and cap the length.
//! 3. Rewrite role-impersonation lines (`System:`, `Assistant:` …) as quoted
//!    user speech.
//! 4. Break code fences and special-token markers (`<|…|>`, `[INST]`, `<<SYS>>`).
//! 5. Cap the length again, since step 3 can grow the text.

use crate::core::string::take_chars;
use regex::Regex;
use std::sync::LazyLock;

/// Maximum sanitized prompt length, in characters
pub const MAX_PROMPT_CHARS: usize = 2000;

static ROLE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(system|assistant|developer|user|human|ai|tool)\s*:")
        .expect("role marker pattern is valid")
});

static SPECIAL_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\|[^<>]*?\|>").expect("special token pattern is valid"));

static INSTRUCTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[/?INST\]|<</?SYS>>").expect("instruction marker pattern is valid")
});

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`{3,}|~{3,}").expect("code fence pattern is valid"));

/// Sanitize raw user text
pub fn sanitize_prompt(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| is_allowed_char(*c)).collect();
    let capped = take_chars(stripped.trim(), MAX_PROMPT_CHARS);

    let neutralized = capped
        .split('\n')
        .map(neutralize_role_line)
        .collect::<Vec<_>>()
        .join("\n");

    let neutralized = SPECIAL_TOKEN.replace_all(&neutralized, "[token]");
    let neutralized = INSTRUCTION_MARKER.replace_all(&neutralized, "[marker]");
    let neutralized = CODE_FENCE.replace_all(&neutralized, "'''");
    let neutralized = neutralized.replace("<|", "< |").replace("|>", "| >");

    take_chars(&neutralized, MAX_PROMPT_CHARS)
}

fn is_allowed_char(c: char) -> bool {
    if c == '\n' || c == '\t' {
        return true;
    }
    !c.is_control() && !is_invisible_format(c)
}

/// Zero-width, bidi-control and other invisible format characters
fn is_invisible_format(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{061C}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
    )
}

fn neutralize_role_line(line: &str) -> String {
    if ROLE_MARKER.is_match(line) {
        format!("User wrote: \"{}\"", line.trim().replace('"', "'"))
    } else {
        line.to_string()
    }
}
