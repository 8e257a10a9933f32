//! Trial Controller (ranklab-tc) - Main entry point
//!
//! Hosts one listening-test run: serves the browser UI, gates playback,
//! collects drag-and-drop rankings, and delivers the final CSV.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use ranklab_common::Settings;
use ranklab_tc::{build_router, AppState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for ranklab-tc
#[derive(Parser, Debug)]
#[command(name = "ranklab-tc")]
#[command(about = "Trial Controller for RankLab listening tests")]
#[command(version)]
struct Args {
    /// Address to listen on
    #[arg(short, long, env = "RANKLAB_BIND")]
    bind: Option<String>,

    /// Root folder containing wav/ audio assets
    #[arg(short, long, env = "RANKLAB_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// External submission endpoint URL
    #[arg(short, long, env = "RANKLAB_SUBMIT_URL")]
    submit_url: Option<String>,

    /// Total number of trials in the run
    #[arg(short, long, env = "RANKLAB_TRIALS")]
    trials: Option<usize>,

    /// Path to a TOML config file
    #[arg(short, long, env = "RANKLAB_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ranklab_tc=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting RankLab Trial Controller (ranklab-tc) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    // Settings resolve CLI/env > TOML file > compiled defaults
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        settings.bind_addr = bind;
    }
    if let Some(root) = args.root_folder {
        settings.root_folder = root;
    }
    if let Some(url) = args.submit_url {
        settings.submit_url = Some(url);
    }
    if let Some(trials) = args.trials {
        settings.trials = trials;
    }
    settings.validate()?;

    info!("Root folder: {}", settings.root_folder.display());
    info!("Audio assets: {}", settings.audio_dir().display());
    match &settings.submit_url {
        Some(url) => info!("Submission endpoint: {}", url),
        None => info!("Submission endpoint: none (local CSV copy only)"),
    }
    info!(
        "Run shape: {} trials, {} samples per trial",
        settings.trials, settings.samples
    );

    let bind_addr = settings.bind_addr.clone();
    let state = AppState::new(settings);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("ranklab-tc listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
