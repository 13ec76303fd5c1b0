//! Command-line entry point: argument parsing, config, runtime setup.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glint_core::config::Config;
use glint_core::providers::gemini::{GeminiClient, GeminiConfig};

#[derive(Parser)]
#[command(name = "glint")]
#[command(version)]
#[command(about = "Terminal chat client for the Gemini API")]
pub struct Cli {
    /// Model for text-only requests (overrides config)
    #[arg(long)]
    pub model: Option<String>,

    /// Model for requests with an image attachment (overrides config)
    #[arg(long)]
    pub vision_model: Option<String>,

    /// Path to an alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(vision_model) = cli.vision_model {
        config.vision_model = vision_model;
    }

    let gemini = GeminiConfig::from_env(
        config.model.clone(),
        config.vision_model.clone(),
        config.max_output_tokens,
        config.base_url.as_deref(),
        config.api_key.as_deref(),
    )?;
    let client = GeminiClient::new(gemini);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(async {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        crate::chat::run_chat(stdin.lock(), &mut stdout, client).await
    })
}

/// Initializes stderr logging, filtered by RUST_LOG (default: warn).
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
