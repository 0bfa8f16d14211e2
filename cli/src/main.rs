//! CLI entrypoint for Colloquy
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use colloquy_application::{
    DialogueParams, InteractionLogger, NoInteractionLog, NoSessionStore, Reasoner,
    RunDialogueInput, RunDialogueUseCase, SessionStore,
};
use colloquy_domain::select_personas;
use colloquy_infrastructure::{
    ConfigLoader, HttpReasoner, JsonFileSessionStore, JsonlInteractionLogger, ScriptedReasoner,
};
use colloquy_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    info!("Starting Colloquy");

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        match ConfigLoader::load(cli.config.as_ref()) {
            Ok(config) => config,
            Err(e) => bail!("Could not load configuration: {e}"),
        }
    };

    let query = match cli.query {
        Some(q) => q,
        None => bail!("A query is required."),
    };

    // Build the roster: CLI selection wins over the config file
    let persona_names = if cli.persona.is_empty() {
        config.roster.personas.clone()
    } else {
        cli.persona.clone()
    };
    let roster = select_personas(&persona_names);
    if roster.is_empty() {
        bail!("No known personas selected.");
    }

    // === Dependency Injection ===
    let endpoint = cli.endpoint.or_else(|| config.reasoner.endpoint.clone());
    let reasoner: Arc<dyn Reasoner> = match (&endpoint, cli.offline) {
        (Some(url), false) => Arc::new(
            HttpReasoner::new(url.clone())
                .with_timeout(Duration::from_secs(config.reasoner.timeout_secs)),
        ),
        _ => Arc::new(ScriptedReasoner::offline()),
    };

    let store: Arc<dyn SessionStore> = match &config.behavior.snapshot_dir {
        Some(dir) => Arc::new(JsonFileSessionStore::new(dir)),
        None => Arc::new(NoSessionStore),
    };

    let logger: Arc<dyn InteractionLogger> = config
        .behavior
        .interaction_log
        .as_ref()
        .and_then(|path| JsonlInteractionLogger::new(path))
        .map(|l| Arc::new(l) as Arc<dyn InteractionLogger>)
        .unwrap_or_else(|| Arc::new(NoInteractionLog));

    let mut params = DialogueParams::default();
    if cli.no_summaries || !config.behavior.enable_summaries {
        params = params.without_summaries();
    }
    if !config.behavior.enable_tie_break {
        params = params.without_tie_break();
    }
    if config.behavior.snapshot_dir.is_none() {
        params = params.without_snapshots();
    }

    // Print header
    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|                 Colloquy - Dialogue Panel                  |");
        println!("+============================================================+");
        println!();
        println!("Query: {}", query);
        println!(
            "Personas: {}",
            roster
                .iter()
                .map(|p| p.display_name.clone())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
    }

    let use_case = RunDialogueUseCase::new(reasoner)
        .with_store(store)
        .with_logger(logger);
    let input = RunDialogueInput::new(query, roster).with_params(params);

    let outcome = if cli.quiet {
        use_case.execute(input).await?
    } else {
        let progress = ProgressReporter::new();
        use_case
            .execute_with_progress(input, &progress, &CancellationToken::new())
            .await?
    };

    // Output results
    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&outcome),
        OutputFormat::Conclusion => ConsoleFormatter::format_conclusion_only(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
    };

    println!("{}", output);

    Ok(())
}
