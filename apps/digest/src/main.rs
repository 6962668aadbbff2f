mod cli;
mod config;
mod errors;
mod llm_client;
mod pipeline;
mod report;
mod snapshot;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::pipeline::{GenerationOutcome, RunOptions};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting digest v{}", env!("CARGO_PKG_VERSION"));

    let llm = build_llm_client(&cli, &config);

    let options = RunOptions {
        snapshot_path: cli.snapshot,
        username: cli.member,
        output_dir: cli.output_dir,
        save_prompt: cli.save_prompt,
    };

    let summary = pipeline::run(&options, llm.as_ref().map(|c| c as &dyn TextGenerator))
        .await
        .inspect_err(|e| error!(code = e.code(), "Run aborted: {e}"))?;

    info!(
        "Card list: {} ({} cards)",
        summary.card_list_path.display(),
        summary.card_count
    );
    if let Some(path) = &summary.prompt_path {
        info!("Prompt: {}", path.display());
    }
    match &summary.generation {
        GenerationOutcome::Written(path) => info!("Resume points: {}", path.display()),
        GenerationOutcome::Failed(message) => {
            warn!("Resume points not written: {message}")
        }
        GenerationOutcome::Skipped | GenerationOutcome::NotAttempted => {}
    }

    Ok(())
}

/// `None` when generation is switched off or no usable API key is configured.
fn build_llm_client(cli: &Cli, config: &Config) -> Option<LlmClient> {
    if cli.skip_generation {
        return None;
    }
    let Some(api_key) = config.anthropic_api_key.clone() else {
        warn!("ANTHROPIC_API_KEY is not set; resume points will not be generated");
        return None;
    };
    match LlmClient::new(api_key) {
        Ok(client) => {
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(client)
        }
        Err(e) => {
            warn!("LLM client unavailable, resume points will not be generated: {e}");
            None
        }
    }
}
