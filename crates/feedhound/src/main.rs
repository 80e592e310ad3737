// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feedhound - a forum feed watcher.
//!
//! Binary entry point: harvests configured RSS sources, classifies and
//! summarizes new posts through an AI backend, and dispatches promotional
//! finds to a Telegram channel.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod status;

use clap::{Parser, Subcommand};
use feedhound_core::{AiSettings, ChannelSettings, FeedhoundError};
use feedhound_pipeline::Pipeline;
use feedhound_storage::Database;

/// Feedhound - a forum feed watcher.
#[derive(Parser, Debug)]
#[command(name = "feedhound", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one full pipeline invocation and exit.
    Run,
    /// Run the pipeline on the configured interval.
    Serve,
    /// Show aggregate counters from the ledger.
    Status {
        /// Output structured JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// Send a test message to the configured channel.
    TestMessage {
        /// Message text.
        #[arg(default_value = "feedhound connectivity check")]
        text: String,
    },
    /// Run one test classification against the AI backend.
    Classify {
        title: String,
        content: String,
    },
    /// Read or write runtime settings.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    /// Print the effective AI and channel settings.
    Show,
    /// Write one setting key.
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match feedhound_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            feedhound_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    serve::init_tracing(&config.watcher.log_level);
    tracing::info!(
        name = %config.watcher.name,
        sources = config.sources.len(),
        database = %config.storage.database_path,
        "configuration loaded"
    );

    if let Err(e) = dispatch(cli, config).await {
        eprintln!("feedhound: {e}");
        std::process::exit(1);
    }
}

async fn dispatch(
    cli: Cli,
    config: feedhound_config::model::FeedhoundConfig,
) -> Result<(), FeedhoundError> {
    let db = Database::open(&config.storage.database_path).await?;
    let pipeline = Pipeline::new(config, db)?;

    match cli.command {
        Some(Commands::Run) => {
            let report = pipeline.run_once().await;
            println!(
                "run complete: {} new, {} enriched, {} sent",
                report.inserted, report.enriched, report.dispatch.sent
            );
        }
        Some(Commands::Serve) => {
            serve::run_serve(&pipeline).await;
        }
        Some(Commands::Status { json }) => {
            status::run_status(&pipeline, json).await?;
        }
        Some(Commands::TestMessage { text }) => {
            pipeline.send_test_message(&text).await?;
            println!("test message delivered");
        }
        Some(Commands::Classify { title, content }) => {
            match pipeline.classify_test(&title, &content).await? {
                Some(enrichment) => {
                    println!("type: {}", enrichment.post_type);
                    println!("summary: {}", enrichment.summary);
                }
                None => println!("backend returned no text"),
            }
        }
        Some(Commands::Settings { action }) => run_settings(&pipeline, action).await?,
        None => {
            println!("feedhound: use --help for available commands");
        }
    }
    Ok(())
}

async fn run_settings(pipeline: &Pipeline, action: SettingsAction) -> Result<(), FeedhoundError> {
    match action {
        SettingsAction::Show => {
            let AiSettings {
                provider,
                endpoint,
                api_key,
                model,
                prompt,
            } = pipeline.ai_settings().await?;
            let ChannelSettings { bot_token, chat_id } = pipeline.channel_settings().await?;

            println!("ai.provider  = {provider}");
            println!("ai.endpoint  = {endpoint}");
            println!("ai.api_key   = {}", mask(&api_key));
            println!("ai.model     = {model}");
            println!("ai.prompt    = {prompt}");
            println!("tg.bot_token = {}", mask(&bot_token));
            println!("tg.chat_id   = {chat_id}");
        }
        SettingsAction::Set { key, value } => {
            pipeline.settings().set(&key, &value).await?;
            println!("{key} updated");
        }
    }
    Ok(())
}

/// Secrets are never echoed back in full.
fn mask(secret: &str) -> String {
    if secret.is_empty() {
        "(unset)".to_string()
    } else if secret.len() <= 8 {
        "****".to_string()
    } else {
        let head: String = secret.chars().take(4).collect();
        format!("{head}****")
    }
}
