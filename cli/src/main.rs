//! CLI entrypoint for atlas
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use atlas_application::{
    ConversationLogger, NoConversationLogger, Orchestrator, StartSessionUseCase, TextGenerator,
};
use atlas_infrastructure::{
    ConfigLoader, FileConfig, JsonContextProvider, JsonlConversationLogger, OpenAiTextGenerator,
};
use atlas_presentation::{Cli, ConsoleFormatter, OutputConfig, ProgressReporter};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        println!();
        println!("Effective configuration:");
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    config.validate().context("Invalid configuration")?;

    // Initialize logging; the guard flushes the file writer on exit
    let _guard = init_logging(cli.verbose, config.logging.log_dir.as_deref());

    info!("Starting atlas");

    // Command-line flags win over the config file
    let mut params = config.execution_params();
    if let Some(placement) = cli.advisor_placement {
        params = params.with_advisor_placement(placement);
    }
    if let Some(policy) = cli.policy {
        let max_iterations = params.max_iterations;
        params = params.with_policy(policy, max_iterations);
    }

    let output = OutputConfig::new(config.output.format, config.output.color).with_cli_overrides(&cli);
    if !output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    // One text-generation handle shared by the coordinator and every agent
    let generator: Arc<dyn TextGenerator> = Arc::new(OpenAiTextGenerator::from_config(&config.llm)?);

    if cli.check_auth {
        if generator.check_auth().await {
            println!("Authentication OK ({})", config.llm.model);
            return Ok(());
        }
        bail!("Authentication failed for {}", config.llm.base_url);
    }

    let Some(request) = cli.request.clone() else {
        bail!("A request is required. See --help for usage.");
    };

    let (Some(profile), Some(calendar), Some(tasks)) = (&cli.profile, &cli.calendar, &cli.tasks)
    else {
        bail!("--profile, --calendar and --tasks are all required to run a request");
    };

    let provider = JsonContextProvider::open(profile, calendar, tasks)?;
    let student_id = match cli.student_id.clone().or_else(|| provider.default_student_id()) {
        Some(id) => id,
        None => bail!("No student id given and the profile records contain none"),
    };

    let store = StartSessionUseCase::new(Arc::new(provider), params.event_window_days)
        .execute(&student_id, &request)?;

    let logger = conversation_logger(&config);
    let mut orchestrator = Orchestrator::standard(generator, &params, logger);
    if output.show_progress {
        orchestrator = orchestrator.with_progress(Arc::new(ProgressReporter::new()));
    }

    let outcome = orchestrator.run(store).await;
    info!(iterations = outcome.iterations(), "Workflow finished");

    println!("{}", ConsoleFormatter::render(output.format, &request, &outcome));

    Ok(())
}

/// Verbosity picks the level unless `RUST_LOG` is set; `log_dir` adds a
/// daily rolling file
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "atlas.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

fn conversation_logger(config: &FileConfig) -> Arc<dyn ConversationLogger> {
    config
        .logging
        .conversation_log
        .as_ref()
        .and_then(JsonlConversationLogger::open)
        .map(|logger| Arc::new(logger) as Arc<dyn ConversationLogger>)
        .unwrap_or_else(|| Arc::new(NoConversationLogger))
}
