//! Console output formatter for deliberation outcomes

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_domain::{
    Consensus, CouncilMessage, DeliberationOutcome, HookParameters, Opinion, OutcomeSource,
    Proposal,
};

/// Formats deliberation outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete outcome
    pub fn format(outcome: &DeliberationOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Agent Council Deliberation"));
        output.push('\n');
        output.push_str(&Self::source_line(&outcome.source));

        output.push_str(&Self::section_header("Transcript"));
        for message in &outcome.deliberation.messages {
            output.push_str(&Self::message_block(message));
        }

        output.push_str(&Self::section_header("Verdict"));
        output.push_str(&Self::verdict_lines(outcome));

        output.push_str(&Self::section_header("Proposal"));
        output.push_str(&Self::proposal_lines(&outcome.proposal));

        output.push_str(&Self::section_header("Hook Parameters"));
        output.push_str(&Self::hook_lines(&outcome.hook_parameters));

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &DeliberationOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Verdict, proposal and hook parameters (concise output)
    pub fn format_summary(outcome: &DeliberationOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Agent Council Decision ===".cyan().bold()
        ));
        output.push_str(&Self::verdict_lines(outcome));
        output.push('\n');
        output.push_str(&Self::proposal_lines(&outcome.proposal));
        output.push('\n');
        output.push_str(&Self::hook_lines(&outcome.hook_parameters));

        output
    }

    fn source_line(source: &OutcomeSource) -> String {
        match source {
            OutcomeSource::Local => format!("{} local council\n", "Source:".cyan().bold()),
            OutcomeSource::Delegate {
                endpoint,
                payment_ref,
            } => {
                let mut line = format!("{} delegate {}", "Source:".cyan().bold(), endpoint);
                if let Some(reference) = payment_ref {
                    line.push_str(&format!(" (payment {})", reference));
                }
                line.push('\n');
                line
            }
        }
    }

    fn message_block(message: &CouncilMessage) -> String {
        let opinion = match message.opinion {
            Opinion::Support => message.opinion.as_str().green().bold(),
            Opinion::Oppose => message.opinion.as_str().red().bold(),
            Opinion::Concern => message.opinion.as_str().yellow().bold(),
            Opinion::Neutral => message.opinion.as_str().dimmed(),
        };
        format!(
            "\n{} {} {}\n{}\n",
            format!("── {} ──", message.agent_name).yellow().bold(),
            opinion,
            format!("({}%)", message.confidence).dimmed(),
            Self::indent(&message.reasoning, "  ")
        )
    }

    fn verdict_lines(outcome: &DeliberationOutcome) -> String {
        let deliberation = &outcome.deliberation;
        let consensus = match deliberation.consensus {
            Consensus::Unanimous | Consensus::Majority => {
                deliberation.consensus.as_str().green().bold()
            }
            Consensus::Contested => deliberation.consensus.as_str().yellow().bold(),
            Consensus::Vetoed => deliberation.consensus.as_str().red().bold(),
        };
        let tally = &deliberation.vote_tally;
        format!(
            "{} {}\n{} {} {} support, {} oppose, {} abstain ({} rounds)\n",
            "Consensus:".cyan().bold(),
            consensus,
            "Votes:".cyan().bold(),
            tally.summary(),
            tally.support,
            tally.oppose,
            tally.abstain,
            deliberation.rounds
        )
    }

    fn proposal_lines(proposal: &Proposal) -> String {
        match proposal {
            Proposal::Trade(trade) => format!(
                "{} {} {}\n  amount in:    {}\n  expected out: {}\n  max slippage: {} bps\n  risk:         {}\n  confidence:   {}%\n{}\n",
                "Trade:".cyan().bold(),
                trade.strategy.as_str().bold(),
                trade.pair,
                trade.amount_in,
                trade.expected_amount_out,
                trade.max_slippage_bps,
                trade.risk_level,
                trade.confidence,
                Self::indent(&trade.reasoning, "  ")
            ),
            Proposal::TokenLaunch(launch) => format!(
                "{} {} ({})\n  description:  {}\n  vault:        {}%\n  lockup:       {} days\n  rewards to:   {}\n  risk:         {}\n",
                "Token launch:".cyan().bold(),
                launch.token_name.bold(),
                launch.token_symbol,
                launch.token_description,
                launch.vault_pct,
                launch.lockup_days,
                launch.reward_recipient,
                launch.risk_level
            ),
        }
    }

    fn hook_lines(hook: &HookParameters) -> String {
        format!(
            "{}\n  fee:           {} bps\n  max swap size: {}\n  sentiment:     {:+} ({})\n",
            "Hook:".cyan().bold(),
            hook.fee_bps,
            hook.max_swap_size,
            hook.sentiment_score,
            hook.sentiment_reason
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, outcome: &DeliberationOutcome) -> String {
        Self::format(outcome)
    }

    fn format_json(&self, outcome: &DeliberationOutcome) -> String {
        Self::format_json(outcome)
    }

    fn format_summary(&self, outcome: &DeliberationOutcome) -> String {
        Self::format_summary(outcome)
    }
}
