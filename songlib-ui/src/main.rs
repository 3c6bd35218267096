//! songlib - Music library terminal client
//!
//! Browses and edits the song catalog served at the configured base URL.
//! With `--mock` the fixture backend runs in-process instead.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use songlib_common::config::{CliOverrides, ConfigResolver};
use songlib_mock::fixtures::{DEFAULT_RNG_SEED, DEFAULT_SEED_COUNT};
use songlib_mock::AppState;
use songlib_ui::shell::{Flow, Shell};
use songlib_ui::{spawn_orchestrator, HttpSongsApi};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for songlib
#[derive(Parser, Debug)]
#[command(name = "songlib")]
#[command(about = "Terminal client for the song catalog")]
#[command(version)]
struct Args {
    /// Catalog service base URL (overrides env and config file)
    #[arg(long)]
    api_base_url: Option<String>,

    /// Songs per page
    #[arg(long)]
    page_size: Option<u32>,

    /// Run the fixture backend in-process and use it
    #[arg(long)]
    mock: bool,

    /// Config file to read instead of the platform default
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let resolver = match &args.config {
        Some(path) => ConfigResolver::with_config_path(path),
        None => ConfigResolver::new(),
    };
    let mut config = resolver.resolve(&CliOverrides {
        api_base_url: args.api_base_url.clone(),
        page_size: args.page_size,
    });

    // Logs go to stderr so they stay out of the rendered screens
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("songlib={0},songlib_ui={0}", config.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting songlib v{}", env!("CARGO_PKG_VERSION"));

    if args.mock {
        let state = AppState::seeded(DEFAULT_SEED_COUNT, DEFAULT_RNG_SEED);
        let (addr, _server) = songlib_mock::serve_ephemeral(state)
            .await
            .context("Failed to start in-process mock backend")?;
        config.api_base_url = format!("http://{}/api", addr);
    }
    info!("Catalog service: {}", config.api_base_url);

    let api = HttpSongsApi::from_config(&config).context("Failed to create HTTP client")?;
    let (handle, _orchestrator) = spawn_orchestrator(Arc::new(api));
    let mut updates = handle.subscribe();
    let mut shell = Shell::new(handle, config.page_size);

    println!("Type `help` for commands.");
    shell.start().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                let (flow, output) = shell.handle_line(&line).await?;
                if !output.is_empty() {
                    println!("{}", output);
                }
                if flow == Flow::Quit {
                    break;
                }
                prompt();
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                if let Some(screen) = shell.on_snapshot(&state) {
                    println!("\n{}", screen);
                    prompt();
                }
            }
        }
    }

    info!("songlib exiting");
    Ok(())
}

fn prompt() {
    print!("songlib> ");
    let _ = std::io::stdout().flush();
}
