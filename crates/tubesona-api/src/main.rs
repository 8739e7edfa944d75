//! Tubesona REST API entry point.
//!
//! Binary name: `tubesona`
//!
//! Loads configuration (env keys + optional `tubesona.toml`), wires the
//! services, and serves the API until Ctrl+C or SIGTERM.

mod http;
mod state;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tubesona_infra::config::Settings;

use state::AppState;

#[derive(Parser)]
#[command(name = "tubesona", about = "Chat with a simulated YouTube channel persona")]
struct Cli {
    /// Path to the optional config file.
    #[arg(long, default_value = "tubesona.toml")]
    config: PathBuf,

    /// Bind host (overrides the config file).
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides the config file).
    #[arg(long)]
    port: Option<u16>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,tubesona=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let settings = Settings::load(&cli.config)
        .await
        .context("loading configuration")?;

    let host = cli.host.unwrap_or_else(|| settings.server.host.clone());
    let port = cli.port.unwrap_or(settings.server.port);

    let state = AppState::from_settings(&settings);
    let router = http::router::build_router(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    println!(
        "  {} Tubesona API listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
