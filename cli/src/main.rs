//! CLI entrypoint for provider-orchestra
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use orchestra_application::{
    CompletionOptions, ConsensusOptions, DebateOptions, EventListener, Orchestra, QueryOptions,
};
use orchestra_domain::StreamEvent;
use orchestra_infrastructure::{
    ConfigLoader, DefaultProviderFactory, FileConfig, JsonlEventLogger, TracingEventListener,
};
use orchestra_presentation::{
    Cli, Command, ConsoleFormatter, JsonFormatter, OutputFormat, OutputFormatter,
    ProgressReporter, SimpleProgress,
};
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Command::ShowConfig = cli.command {
        println!("{}", ConfigLoader::describe_sources(cli.config.as_deref()));
        return Ok(ExitCode::SUCCESS);
    }

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| file_config.logging.log_file.as_ref().map(PathBuf::from));
    let _log_guard = init_tracing(cli.verbose, log_file.as_deref())?;

    info!("Starting provider-orchestra");

    file_config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    let mut config = file_config.to_orchestra_config();
    if let Some(ms) = cli.timeout_ms {
        config = config.with_timeout(Duration::from_millis(ms));
    }

    // === Dependency Injection ===
    let listeners = build_listeners(&cli, &file_config);
    let orchestra = Orchestra::with_listeners(
        config,
        Arc::new(DefaultProviderFactory::new()),
        listeners,
    )?;

    let formatter: Box<dyn OutputFormatter> = match cli.output {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    };

    run(&cli, &orchestra, formatter.as_ref()).await
}

/// Initialize logging based on verbosity level.
///
/// The returned guard must stay alive until exit when logging to a file.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

fn build_listeners(cli: &Cli, file_config: &FileConfig) -> Vec<Arc<dyn EventListener>> {
    let mut listeners: Vec<Arc<dyn EventListener>> = vec![Arc::new(TracingEventListener)];

    let event_log = cli
        .event_log
        .clone()
        .or_else(|| file_config.logging.event_log.as_ref().map(PathBuf::from));
    if let Some(path) = event_log {
        match JsonlEventLogger::new(&path) {
            Some(logger) => {
                info!("Writing events to {}", logger.path().display());
                listeners.push(Arc::new(logger));
            }
            None => warn!("Event log disabled"),
        }
    }

    let shows_progress = matches!(cli.command, Command::Consensus { .. } | Command::Debate { .. });
    if shows_progress && !cli.quiet && cli.output == OutputFormat::Text {
        if std::io::stderr().is_terminal() {
            listeners.push(Arc::new(ProgressReporter::new()));
        } else {
            listeners.push(Arc::new(SimpleProgress));
        }
    }

    listeners
}

async fn run(
    cli: &Cli,
    orchestra: &Orchestra,
    formatter: &dyn OutputFormatter,
) -> Result<ExitCode> {
    match &cli.command {
        Command::Query {
            prompt,
            provider,
            max_tokens,
            temperature,
            stream,
        } => {
            // The overall limit comes from the config, which --timeout-ms overrides
            let options = QueryOptions {
                completion: CompletionOptions {
                    max_tokens: *max_tokens,
                    temperature: *temperature,
                    provider: provider.clone(),
                },
                timeout: None,
            };

            if *stream && cli.output == OutputFormat::Text {
                stream_to_stdout(orchestra, prompt, &options).await?;
            } else {
                let response = orchestra.query(prompt, &options).await?;
                println!("{}", formatter.format_response(&response));
            }
        }
        Command::Consensus {
            prompt,
            providers: _,
            mode,
        } => {
            let mut options = ConsensusOptions::default();
            if let Some(providers) = cli.command.selected_providers() {
                options = options.with_providers(providers.iter().cloned());
            }
            if let Some(mode) = mode {
                options = options.with_mode(*mode);
            }

            let result = orchestra.consensus(prompt, &options).await?;
            println!("{}", formatter.format_consensus(&result));
        }
        Command::Debate {
            prompt,
            providers: _,
            threshold,
            max_rounds,
        } => {
            let mut options = DebateOptions::default();
            if let Some(providers) = cli.command.selected_providers() {
                options = options.with_providers(providers.iter().cloned());
            }
            if let Some(threshold) = threshold {
                options = options.with_threshold(*threshold);
            }
            if let Some(max_rounds) = max_rounds {
                options = options.with_max_rounds(*max_rounds);
            }

            let result = orchestra.debate(prompt, &options).await?;
            println!("{}", formatter.format_debate(&result));
        }
        Command::Health => {
            let report = orchestra.health_check().await;
            print!("{}", formatter.format_health(&report));
            if report.values().any(|healthy| !healthy) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Providers => {
            let default_provider = orchestra.config().default_provider.as_deref();
            print!(
                "{}",
                formatter.format_providers(&orchestra.providers(), default_provider)
            );
        }
        Command::ShowConfig => {
            println!("{}", ConfigLoader::describe_sources(cli.config.as_deref()));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Print deltas as they arrive.
async fn stream_to_stdout(orchestra: &Orchestra, prompt: &str, options: &QueryOptions) -> Result<()> {
    let mut handle = orchestra.stream(prompt, options).await?;
    let mut stdout = std::io::stdout();
    let mut printed = false;

    while let Some(event) = handle.receiver.recv().await {
        match event {
            StreamEvent::Delta(chunk) => {
                print!("{}", chunk);
                stdout.flush()?;
                printed = true;
            }
            StreamEvent::Completed(response) => {
                if !printed {
                    print!("{}", response.content);
                }
                break;
            }
            StreamEvent::Error(e) => bail!("Stream failed: {}", e),
        }
    }
    println!();
    Ok(())
}
