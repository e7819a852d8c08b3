//! Weightlog CLI
//!
//! Terminal front end for the weight form:
//! - Add a weight and see how it compares to the previous one
//! - Show the history panel
//! - Generate a default config

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use weightlog::client::{ClientView, HttpEntryClient, NoticeDelays, SubmitOutcome};
use weightlog::config::{generate_default_config, Config, LoggingConfig};
use weightlog::logging::init_tracing;

#[derive(Parser)]
#[command(name = "weightlog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Minimal weight tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (default: from config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record today's weight in kilograms
    Add {
        /// Weight, e.g. 72.4
        weight: String,
    },

    /// Show all recorded weights
    History,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Generating a template must work even when the current config is broken
    if let Commands::Config { output } = &cli.command {
        write_default_config(output.as_deref())?;
        return Ok(());
    }

    let mut config = Config::load_default().context("loading configuration")?;
    if let Some(url) = cli.api_url {
        config.client.api_url = url;
    }

    // Only warnings and errors reach the terminal unless RUST_LOG says otherwise
    init_tracing(&LoggingConfig {
        level: "warn".to_string(),
        ..config.logging.clone()
    });

    match cli.command {
        Commands::Add { weight } => {
            let view = build_view(&config)?;
            view.set_input(weight);

            match view.submit().await {
                SubmitOutcome::Saved { entry, comparison } => {
                    let state = view.snapshot();
                    println!("Saved {} kg for {}", entry.weight_kg, entry.entry_date);
                    match comparison {
                        Some(c) => println!("Compared to previous: {}", c),
                        None => println!("First entry"),
                    }
                    if let Some(notification) = state.notification() {
                        println!();
                        println!("  {}", notification.message());
                    }
                    println!("Background: {}", state.backdrop.gradient());
                }
                SubmitOutcome::Invalid(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
                SubmitOutcome::Failed(e) => {
                    let message = view
                        .snapshot()
                        .toast()
                        .map(|t| t.message.clone())
                        .unwrap_or_default();
                    eprintln!("{}: {}", message, e);
                    eprintln!();
                    eprintln!("Make sure the Weightlog API server is running at {}", config.client.api_url);
                    eprintln!("  cargo run --bin weightlog");
                    std::process::exit(1);
                }
                SubmitOutcome::Busy => {
                    eprintln!("Another submission is still in flight");
                    std::process::exit(1);
                }
            }
        }

        Commands::History => {
            let view = build_view(&config)?;
            if let Err(e) = view.refresh().await {
                eprintln!("Cannot fetch entries from {}", config.client.api_url);
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }

            for line in view.snapshot().history_lines() {
                println!("{}", line);
            }
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

fn write_default_config(output: Option<&Path>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn build_view(config: &Config) -> anyhow::Result<ClientView<HttpEntryClient>> {
    let client = HttpEntryClient::new(&config.client)?;
    Ok(ClientView::with_delays(
        client,
        NoticeDelays::from_config(&config.client),
    ))
}
