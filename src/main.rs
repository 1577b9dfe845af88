//! Workbox Agent - CLI entry point.
//!
//! Sends the user prompt through the agent loop and prints the final answer.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use workbox_agent::{agent::Agent, config::Config};

/// Workspace-confined coding agent.
#[derive(Debug, Parser)]
#[command(name = "workbox-agent", version, about)]
struct Cli {
    /// User prompt for the agent.
    prompt: String,

    /// Print the prompt and token usage after the final answer.
    #[arg(long)]
    verbose: bool,

    /// Override the configured model.
    #[arg(long)]
    model: Option<String>,

    /// Override the workspace directory.
    #[arg(long)]
    workspace: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workbox_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(model) = cli.model {
        config.default_model = model;
    }
    if let Some(workspace) = cli.workspace {
        config.workspace_path = workspace;
    }
    config.canonicalize_workspace()?;

    info!(
        "model={} workspace={}",
        config.default_model,
        config.workspace_path.display()
    );

    let agent = Agent::new(config);
    let report = agent.run_task(&cli.prompt).await?;

    if cli.verbose {
        println!("User prompt: {}", cli.prompt);
        println!("Prompt tokens: {}", report.prompt_tokens);
        println!("Response tokens: {}", report.completion_tokens);
        println!();
    }

    println!("{}", report.answer);

    Ok(())
}
