//! CLI entrypoint for LLM Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use colored::Colorize;
use council_application::{
    ConversationLogger, DebateParams, DebateProgressNotifier, NoConversationLogger, NoProgress,
    ResultStore, RunDebateInput, RunDebateUseCase,
};
use council_domain::{AgentSpec, OutputFormat, Topic};
use council_infrastructure::{
    CompositeResultStore, ConfigLoader, CouncilAssembler, FileConfig, JsonResultStore,
    JsonlConversationLogger, MarkdownRenderer, MarkdownResultStore, ProviderAvailability,
};
use council_presentation::{Cli, ConsoleFormatter, OutputFormatter, ProgressReporter, SimpleProgress};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so the file log is flushed on exit
    let _log_guard = init_tracing(cli.verbose, cli.log_dir.as_deref());

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    if let Some(transcript) = cli.render.as_deref() {
        return render_transcript(transcript, cli.output_dir.as_deref());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;
    config.validate().context("Invalid configuration")?;

    apply_overrides(&cli, &mut config);
    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting LLM Council");

    let assembler = CouncilAssembler::new(&config);

    if cli.list_providers {
        print_providers(&assembler.available_providers());
        return Ok(());
    }

    let specs: Vec<AgentSpec> = if cli.models.is_empty() {
        config.agent_specs()
    } else {
        cli.models
            .iter()
            .map(|spec| spec.parse::<AgentSpec>())
            .collect::<Result<_, _>>()
            .context("Invalid --models value")?
    };

    // Interactive mode if no topic provided
    let topic = match cli.topic.clone() {
        Some(topic) => topic,
        None => match prompt_for_topic(&assembler.available_providers())? {
            Some(topic) => topic,
            None => {
                println!("No topic provided. Exiting.");
                return Ok(());
            }
        },
    };
    let topic = Topic::new(topic)?;

    // === Dependency Injection ===
    let council = Arc::new(assembler.assemble(&specs)?);

    let conversation_logger: Arc<dyn ConversationLogger> = match cli
        .log_dir
        .as_deref()
        .and_then(JsonlConversationLogger::in_directory)
    {
        Some(logger) => {
            info!("Debate transcript log: {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoConversationLogger),
    };

    let use_case = RunDebateUseCase::new(council).with_conversation_logger(conversation_logger);

    let progress: Box<dyn DebateProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress::new())
    };

    let params = DebateParams::default()
        .with_rounds(config.council.rounds)
        .with_exclude_failed_from_synthesis(config.council.exclude_failed_from_synthesis);

    if cli.quick {
        let synthesis = use_case
            .quick_discuss_with_progress(topic, params, progress.as_ref())
            .await?;
        println!("\n{}", synthesis);
        return Ok(());
    }

    let input = RunDebateInput::new(topic).with_params(params);
    let record = use_case
        .execute_with_progress(input, progress.as_ref())
        .await?;

    let format = config.output.format.unwrap_or_default();
    println!("{}", ConsoleFormatter.render(&record, format));

    if !cli.no_save {
        let store = result_store(&config);
        if !store.is_empty() {
            match store.save(&record) {
                Ok(paths) => {
                    for path in paths {
                        eprintln!("{}", format!("Results saved to: {}", path.display()).dimmed());
                    }
                }
                Err(e) => warn!("Could not save debate results: {}", e),
            }
        }
    }

    if format != OutputFormat::Json && !cli.quiet {
        eprintln!("{}", "Debate Complete!".green().bold());
    }

    Ok(())
}

/// Stderr logging filtered by `-v`, plus a daily file log when `--log-dir` is given.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr)
        .with_filter(EnvFilter::new(filter));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "llm-council.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Command-line flags win over every config source.
fn apply_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(rounds) = cli.rounds {
        config.council.rounds = rounds;
    }
    if let Some(format) = cli.output {
        config.output.format = Some(format.into());
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }
    if cli.no_markdown {
        config.output.save_markdown = false;
    }
}

fn result_store(config: &FileConfig) -> CompositeResultStore {
    let mut store = CompositeResultStore::new();
    if config.output.save_json {
        store.push(Box::new(JsonResultStore::new(&config.output.directory)));
    }
    if config.output.save_markdown {
        store.push(Box::new(MarkdownResultStore::new(&config.output.directory)));
    }
    store
}

/// Render a saved transcript as Markdown: to `output_dir` when given,
/// otherwise to stdout.
fn render_transcript(transcript: &Path, output_dir: Option<&Path>) -> Result<()> {
    let record = JsonResultStore::load(transcript)
        .with_context(|| format!("Could not load {}", transcript.display()))?;

    match output_dir {
        Some(dir) => {
            for path in MarkdownResultStore::new(dir).save(&record)? {
                eprintln!("{}", format!("Article saved to: {}", path.display()).dimmed());
            }
        }
        None => print!("{}", MarkdownRenderer.render(&record)),
    }
    Ok(())
}

fn print_providers(providers: &[ProviderAvailability]) {
    println!("{}", "Providers (in council order):".cyan().bold());
    for provider in providers {
        let mark = if provider.available {
            "v".green()
        } else {
            "x".red()
        };
        println!(
            "  {} {:<12} {:<40} {}",
            mark,
            provider.kind.as_str(),
            provider.model,
            provider.note.dimmed()
        );
    }
}

/// Ask for a topic on stdin. `None` when the answer is empty.
fn prompt_for_topic(providers: &[ProviderAvailability]) -> Result<Option<String>> {
    let available: Vec<_> = providers
        .iter()
        .filter(|p| p.available)
        .map(|p| p.kind.as_str())
        .collect();

    println!("\n{}\n", "Welcome to LLM Council".bold());
    println!(
        "Available models: {}",
        if available.is_empty() {
            "none".to_string()
        } else {
            available.join(", ")
        }
    );
    println!();
    print!("Enter a topic for discussion: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let topic = line.trim();
    Ok((!topic.is_empty()).then(|| topic.to_string()))
}
