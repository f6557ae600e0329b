// BFHL service entry point.
//
// Startup sequence for `serve`:
// 1. Initialize tracing
// 2. Copy defaults and load config (file + environment)
// 3. Bind the listener
// 4. Serve until Ctrl+C

use std::path::PathBuf;

use anyhow::Context;
use bfhl_server::{config, http, setup};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "bfhl")]
#[command(about = "Token classification API: numbers by parity, letters, special characters")]
struct Args {
    /// Directory holding `defaults/` and `config/`
    #[arg(long, global = true, default_value = ".")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Prompt for identity details and write config/bfhl.toml
    Setup,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing()?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(args.config_dir).await,
        Command::Setup => run_setup(args.config_dir).await,
    }
}

async fn serve(base_dir: PathBuf) -> anyhow::Result<()> {
    info!("BFHL service starting up");

    let config = config::load_config(&base_dir).context("failed to load configuration")?;
    info!(
        "Config loaded: user_id={}, bind={}",
        config.identity.user_id(),
        config.bind_addr()
    );

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;

    let state = http::AppState::new(config.identity);
    http::run(listener, state, shutdown_signal()).await?;

    info!("BFHL service shut down cleanly");
    Ok(())
}

async fn run_setup(base_dir: PathBuf) -> anyhow::Result<()> {
    tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        setup::run(&base_dir, &mut input, &mut output)
    })
    .await
    .context("setup task failed")?
    .context("setup did not complete")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {e}");
        // Without a signal handler the server runs until the process is killed.
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Initialize tracing to stderr so `setup` prompts on stdout stay clean.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("bfhl_server=info,bfhl_core=info,tower_http=info,warn")
            }),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
