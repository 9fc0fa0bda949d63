//! localefill - command line entry point
//!
//! Loads the configuration, sets up logging and runs the translation
//! orchestrator against records stored in a JSON file.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::Path;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use localefill::cli::{Args, Commands};
use localefill::config::Config;
use localefill::locale::LocaleCatalog;
use localefill::orchestrator::{plan_record, FieldAction, TranslationOrchestrator};
use localefill::provider::SharpApiProvider;
use localefill::record::Translatable;
use localefill::store::JsonFileStore;
use localefill::tone::VoiceTone;

const DEFAULT_CONFIG_FILE: &str = "localefill.toml";

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _guard = setup_logging(args.verbose)?;

    let config = load_config(args.config.as_deref())?;

    match args.command {
        Commands::Translate { input, source, target, tone, output } => {
            // Configuration gate: nothing is touched unless this passes
            config.validate()?;

            let tone: VoiceTone = tone.parse()?;
            let source = source.unwrap_or_else(|| config.default_locale.clone());

            let provider = SharpApiProvider::new(&config.provider)?;
            let orchestrator = TranslationOrchestrator::new(
                config.locales.clone(),
                provider,
                &config.orchestrator,
            )?;

            let store = match &output {
                Some(output) => JsonFileStore::open_with_output(&input, output).await?,
                None => JsonFileStore::open(&input).await?,
            };
            let mut records = store.records().await;

            let outcome = orchestrator
                .translate(&mut records, &store, &source, &target, tone)
                .await?;

            if !outcome.is_completed() {
                bail!(outcome.message());
            }
            println!("{}", outcome.message());
        }
        Commands::Plan { input, source, target } => {
            let source = source.unwrap_or_else(|| config.default_locale.clone());
            for locale in [&source, &target] {
                if !config.locales.contains(locale) {
                    bail!("Locale '{}' is not defined in the locales configuration", locale);
                }
            }

            let store = JsonFileStore::open(&input).await?;
            print_plan(&config.locales, &store.records().await, &source, &target);
        }
        Commands::Locales { exclude } => {
            println!("{:<10} {:<30}", "Code", "Language");
            println!("{}", "-".repeat(40));
            for (code, name) in config.locales.target_options(exclude.as_deref().unwrap_or_default()) {
                let marker = if code == config.default_locale { " (default)" } else { "" };
                println!("{:<10} {}{}", code, name, marker);
            }
        }
        Commands::Tones => {
            for tone in VoiceTone::ALL {
                let marker = if *tone == VoiceTone::default() { " (default)" } else { "" };
                println!("{:<15} {}{}", tone.as_str(), tone.label(), marker);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            // Try the config file in the current directory first
            if Path::new(DEFAULT_CONFIG_FILE).exists() {
                info!("Found {} in current directory, loading...", DEFAULT_CONFIG_FILE);
                Config::from_file(DEFAULT_CONFIG_FILE)?
            } else {
                Config::default()
            }
        }
    };
    Ok(config)
}

fn print_plan<R: Translatable>(locales: &LocaleCatalog, records: &[R], source: &str, target: &str) {
    let source_name = locales.display_name_or_code(source);
    let target_name = locales.display_name_or_code(target);

    println!("Fields to be translated from {} to {}:", source_name, target_name);
    for record in records {
        let plans = plan_record(record, source, target);
        if plans.is_empty() {
            continue;
        }
        println!("\n{}", record.record_id());
        for plan in plans {
            let action = match plan.action {
                FieldAction::Translate => "translate",
                FieldAction::KeepExisting => "keep existing",
                FieldAction::SourceBlank => "source blank",
            };
            println!("  {:<25} {}", plan.field, action);
        }
    }
    println!(
        "\nIf any field above already contains content in {}, translation for it will be ignored.",
        target_name
    );
}

fn setup_logging(verbose: bool) -> Result<WorkerGuard> {
    // Create log directory
    let log_dir = std::env::current_dir()?.join(".localefill").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "localefill.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);

    // Determine log level
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Console output goes to stderr so command output stays clean
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(true)
        .with_line_number(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
