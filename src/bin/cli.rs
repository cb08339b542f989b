// src/bin/cli.rs

//! threadclean CLI
//!
//! Local entry point for cleaning captured threads.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use threadclean::{
    error::Result,
    models::{Config, PostCandidate, ThreadCapture},
    patterns::{PatternSource, PatternStore, from_location},
    pipeline,
    services::TextCleaner,
};
use tokio::io::AsyncReadExt;

/// threadclean - Social thread post cleaner
#[derive(Parser, Debug)]
#[command(
    name = "threadclean",
    version,
    about = "Cleans and deduplicates scraped thread posts"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clean and deduplicate a captured thread
    Extract {
        /// Captured thread JSON
        #[arg(short, long)]
        input: PathBuf,

        /// Output file or directory (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pattern document path or URL (overrides the config)
        #[arg(long)]
        patterns: Option<String>,
    },

    /// Clean a single raw post text from a file or stdin
    Clean {
        /// Thread author username
        #[arg(long, default_value = "unknown")]
        author: String,

        /// Pattern document path or URL (overrides the config)
        #[arg(long)]
        patterns: Option<String>,

        /// Raw text file (default: stdin)
        file: Option<PathBuf>,
    },

    /// Validate the configuration and the pattern document
    Validate {
        /// Pattern document path or URL (overrides the config)
        #[arg(long)]
        patterns: Option<String>,
    },

    /// List the active cleaning patterns
    Patterns {
        /// Pattern document path or URL (overrides the config)
        #[arg(long)]
        patterns: Option<String>,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Resolve the pattern document location: CLI flag first, then the config.
fn pattern_source(config: &Config, location: Option<&str>) -> Result<Option<Box<dyn PatternSource>>> {
    match location.or(config.patterns.source.as_deref()) {
        Some(location) => Ok(Some(from_location(location, &config.patterns)?)),
        None => Ok(None),
    }
}

/// Build a store holding the configured rules, or the defaults.
async fn load_store(config: &Config, location: Option<&str>) -> Result<PatternStore> {
    let store = PatternStore::new();
    match pattern_source(config, location)? {
        Some(source) => {
            store.reload(source.as_ref()).await;
        }
        None => log::info!("No pattern source configured. Using default patterns."),
    }
    Ok(store)
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

async fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => Ok(tokio::fs::read_to_string(path).await?),
        None => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            Ok(text)
        }
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Extract {
            input,
            output,
            patterns,
        } => {
            let store = load_store(&config, patterns.as_deref()).await?;
            let content = tokio::fs::read_to_string(&input).await?;
            let capture: ThreadCapture = serde_json::from_str(&content)?;

            let export = pipeline::run_extraction(&capture, &store, &config)?;
            let json = to_json(&export, config.output.pretty)?;

            match output {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(export.file_name())
                    } else {
                        path
                    };
                    tokio::fs::write(&path, json).await?;
                    log::info!(
                        "Saved {} post(s) ({} words, ~{} min read) to {}",
                        export.stats.post_count,
                        export.stats.word_count,
                        export.stats.read_time_minutes,
                        path.display()
                    );
                }
                None => println!("{json}"),
            }
        }

        Command::Clean {
            author,
            patterns,
            file,
        } => {
            let store = load_store(&config, patterns.as_deref()).await?;
            let text = read_input(file.as_deref()).await?;
            let cleaner = TextCleaner::new(store.snapshot(), config.cleaning.clone());
            println!("{}", cleaner.clean(&PostCandidate::new(text, 0), &author));
        }

        Command::Validate { patterns } => {
            let source = pattern_source(&config, patterns.as_deref())?;
            let report = pipeline::run_validate(&config, source.as_deref()).await?;
            if report.is_clean() {
                log::info!("All validations passed!");
            } else {
                log::warn!("Validation finished with warnings");
            }
        }

        Command::Patterns { patterns } => {
            let store = load_store(&config, patterns.as_deref()).await?;
            let rules = store.snapshot();
            for rule in rules.iter() {
                println!("{:<36} {}", rule.name, rule.description);
                if cli.verbose {
                    println!("{:<36} {}", "", rule.pattern());
                }
            }
            log::info!("{}", rules);
        }
    }

    Ok(())
}
