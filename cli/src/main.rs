//! CLI entrypoint for Agent Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use council_application::{BehaviorConfig, LlmGateway, RunDeliberationUseCase, SystemClock};
use council_domain::{BackendMode, DeliberationContext, DeliberationRequest};
use council_infrastructure::{
    CannedGateway, ConfigLoader, DelegateSettings, EndpointPolicy, FileConfig,
    HttpDelegateGateway, OpenAiCompatibleGateway, OpenAiSettings,
};
use council_presentation::{
    Cli, ConsoleFormatter, OutputConfig, OutputFormatter, ProgressMode, ProgressReporter,
    SimpleProgress,
};
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Must outlive every log call
    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = load_config(&cli)?;
    let output = OutputConfig::resolve(
        cli.output.map(Into::into),
        config.output.format,
        config.output.color,
        cli.quiet,
        std::io::stderr().is_terminal(),
    );
    output.apply_color();

    let prompt = match cli.prompt.as_deref() {
        Some(p) => p,
        None => bail!(
            "A prompt is required, e.g. agent-council --user 0xabc \"swap 100 USDC for ETH\""
        ),
    };
    let user = match cli.user.as_deref() {
        Some(u) => u,
        None => bail!("--user <ADDR> is required"),
    };

    info!("Starting Agent Council ({} backend)", config.backend.mode);

    // === Dependency Injection ===
    let gateway = build_gateway(&config)?;
    let delegate = HttpDelegateGateway::new(DelegateSettings {
        policy: EndpointPolicy::new(config.delegate.allow_localhost),
        timeout: Duration::from_secs(config.delegate.timeout_seconds),
        max_body_bytes: config.delegate.max_body_bytes,
    })?;

    let use_case = RunDeliberationUseCase::new(gateway, Arc::new(SystemClock))
        .with_delegate(Arc::new(delegate))
        .with_config(BehaviorConfig::with_timeout_seconds(
            config.backend.timeout_seconds,
        ));

    let mut context = DeliberationContext::new(user);
    if let Some(chain) = &cli.chain {
        context = context.with_chain(chain);
    }
    for (symbol, amount) in &cli.balances {
        context = context.with_balance(symbol, amount);
    }
    for (symbol, usd) in &cli.prices {
        context = context.with_price(symbol, *usd);
    }
    if let Some(notes) = &cli.notes {
        context = context.with_notes(notes);
    }
    let mut request = DeliberationRequest::new(prompt, context);
    if let Some(endpoint) = cli.delegate.as_ref().or(config.delegate.endpoint.as_ref()) {
        request = request.with_delegate(endpoint);
    }
    if let Some(kind) = cli.kind {
        request = request.with_kind(kind.into());
    }

    let outcome = match output.progress {
        ProgressMode::Bars => {
            let progress = ProgressReporter::new();
            use_case.execute_with_progress(request, &progress).await?
        }
        ProgressMode::Plain => use_case.execute_with_progress(request, &SimpleProgress).await?,
        ProgressMode::Off => use_case.execute(request).await?,
    };

    println!("{}", ConsoleFormatter.render(&outcome, output.format));

    Ok(())
}

/// Install the tracing subscriber; `-v` picks the level unless `RUST_LOG` is set
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
            Ok(None)
        }
    }
}

/// File and environment config with CLI flags applied on top
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("failed to load configuration")?
    };

    if cli.mock {
        config.backend.mode = BackendMode::Mock;
    }
    if cli.allow_localhost {
        config.delegate.allow_localhost = true;
    }
    if let Some(seconds) = cli.timeout {
        config.backend.timeout_seconds = seconds;
    }

    config.validate()?;
    Ok(config)
}

fn build_gateway(config: &FileConfig) -> Result<Arc<dyn LlmGateway>> {
    let backend = &config.backend;
    let gateway: Arc<dyn LlmGateway> = match backend.mode {
        BackendMode::Mock => Arc::new(CannedGateway::new()),
        BackendMode::Live => {
            let api_key = OpenAiCompatibleGateway::api_key_from_env(&backend.api_key_env)?;
            Arc::new(OpenAiCompatibleGateway::new(OpenAiSettings {
                base_url: backend.base_url.clone(),
                model: backend.model.clone(),
                api_key,
                temperature: backend.temperature,
                timeout: Duration::from_secs(backend.timeout_seconds),
            })?)
        }
    };
    info!("Using backend: {}", gateway.backend_name());
    Ok(gateway)
}
