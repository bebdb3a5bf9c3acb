//! Command-line driver for the censoring workflow.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vcensor_client::ApiClient;
use vcensor_models::{SourceFile, StorageKey};
use vcensor_workflow::WorkflowCoordinator;

#[derive(Parser)]
#[command(
    name = "vcensor",
    about = "Upload a video for censoring and fetch the result",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a video, censor it and print the download URL
    Upload {
        /// Path to the video file
        file: PathBuf,
        /// MIME type sent with the upload; guessed from the extension when omitted
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Request a fresh download URL for an already processed output key
    Link {
        /// Output storage key returned by a previous run
        key: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vcensor=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(true).with_target(false))
            .with(env_filter)
            .init();
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Upload { file, content_type } => upload(file, content_type).await,
        Command::Link { key } => link(key).await,
    }
}

async fn upload(path: PathBuf, content_type: Option<String>) -> Result<()> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("File path has no usable file name")?
        .to_string();
    let data = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let source = match content_type {
        Some(declared) => SourceFile::new(name, declared, data),
        None => SourceFile::with_guessed_type(name, data),
    };
    info!(file = %source.name, bytes = source.size(), "Selected file");

    let coordinator = WorkflowCoordinator::from_env()?;
    coordinator.select_file(source);
    coordinator.run().await?;

    let snapshot = coordinator.snapshot();
    info!(state = %snapshot.state, "Run finished");
    if let Some(url) = snapshot.download_url {
        println!("{url}");
    }
    if let Some(preview) = snapshot.preview_url {
        info!("Direct playback: {preview}");
    }
    Ok(())
}

async fn link(key: String) -> Result<()> {
    let api = ApiClient::from_env()?;
    let credential = api
        .request_download_url(&StorageKey::from(key.as_str()))
        .await?;
    println!("{}", credential.url);
    Ok(())
}
