//! CLI command definitions

use clap::{Parser, ValueEnum};
use council_domain::{OutputFormat as DomainOutputFormat, ProposalKind};
use std::path::PathBuf;

/// Output format for deliberation results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Transcript, verdict, proposal and hook parameters
    Full,
    /// Verdict, proposal and hook parameters only
    Summary,
    /// The whole outcome as JSON
    Json,
}

impl From<OutputFormat> for DomainOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => DomainOutputFormat::Full,
            OutputFormat::Summary => DomainOutputFormat::Summary,
            OutputFormat::Json => DomainOutputFormat::Json,
        }
    }
}

/// Proposal variant to force
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Trade,
    TokenLaunch,
}

impl From<KindArg> for ProposalKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Trade => ProposalKind::Trade,
            KindArg::TokenLaunch => ProposalKind::TokenLaunch,
        }
    }
}

/// CLI arguments for agent-council
#[derive(Parser, Debug)]
#[command(name = "agent-council")]
#[command(author, version, about = "Agent Council - Five personas deliberate over a trading request")]
#[command(long_about = r#"
Agent Council runs a fixed council of AI personas over a natural-language
trading or token-launch request and returns a structured proposal.

The process has two phases (three with delegation):
0. Delegation (optional): an allow-listed external agent answers instead
1. Debate: Alpha Hunter, Risk Sentinel, Macro Oracle and Devil's Advocate
   speak in turn, each seeing the transcript so far
2. Synthesis: the Clerk turns the debate into a proposal

A veto from the Risk Sentinel always wins over the vote count.

Configuration files are loaded from (in priority order):
1. AGENT_COUNCIL_* environment variables
2. --config <path>      Explicit config file
3. ./council.toml       Project-level config
4. ~/.config/agent-council/config.toml   Global config

Example:
  agent-council --user 0xabc "swap 100 USDC for ETH"
  agent-council --user 0xabc --mock -o json "launch a community token"
  agent-council --user 0xabc --delegate https://my-agent.vercel.app/run "dca into ETH"
  agent-council --user 0xabc --balance USDC=500 --price ETH=3200 "swap half my USDC"
"#)]
pub struct Cli {
    /// The request to deliberate on
    pub prompt: Option<String>,

    /// Address of the requesting user (required to deliberate)
    #[arg(short, long, value_name = "ADDR")]
    pub user: Option<String>,

    /// Chain the request targets
    #[arg(long, value_name = "NAME")]
    pub chain: Option<String>,

    /// Wallet balance to show the council, repeatable (e.g. USDC=250)
    #[arg(long = "balance", value_name = "SYM=AMT", value_parser = parse_balance)]
    pub balances: Vec<(String, String)>,

    /// USD price to show the council, repeatable (e.g. ETH=3200.5)
    #[arg(long = "price", value_name = "SYM=USD", value_parser = parse_price)]
    pub prices: Vec<(String, f64)>,

    /// Free-form notes added to the request context
    #[arg(long, value_name = "TEXT")]
    pub notes: Option<String>,

    /// Force the proposal variant instead of inferring it from the request
    #[arg(short, long, value_enum)]
    pub kind: Option<KindArg>,

    /// External agent endpoint to delegate to
    #[arg(short, long, value_name = "URL")]
    pub delegate: Option<String>,

    /// Accept localhost delegate endpoints (development only)
    #[arg(long)]
    pub allow_localhost: bool,

    /// Use the offline canned backend
    #[arg(long)]
    pub mock: bool,

    /// Per-call completion timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

fn split_pair(value: &str) -> Result<(String, &str), String> {
    let (symbol, rest) = value
        .split_once('=')
        .ok_or_else(|| format!("expected SYM=VALUE, got `{}`", value))?;
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(format!("missing symbol in `{}`", value));
    }
    Ok((symbol.to_uppercase(), rest.trim()))
}

fn parse_balance(value: &str) -> Result<(String, String), String> {
    let (symbol, amount) = split_pair(value)?;
    match amount.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok((symbol, amount.to_string())),
        _ => Err(format!("balance for {} must be a non-negative number", symbol)),
    }
}

fn parse_price(value: &str) -> Result<(String, f64), String> {
    let (symbol, price) = split_pair(value)?;
    match price.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok((symbol, n)),
        _ => Err(format!("price for {} must be a non-negative number", symbol)),
    }
}
