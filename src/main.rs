use anyhow::Context;
use clap::Parser;
use tokio::signal::unix::{SignalKind, signal};

use shelf::config::{Cli, Config};
use shelf::server::{Server, Shutdown};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level: tracing::Level = cli
        .log_level
        .parse()
        .with_context(|| format!("invalid log level {:?}", cli.log_level))?;
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(level)
        .init();

    let cfg = Config::load(&cli)?;
    std::env::set_current_dir(&cfg.root_dir)
        .with_context(|| format!("failed to change directory to {}", cfg.root_dir.display()))?;
    tracing::info!(
        port = %cfg.port,
        root = %cfg.root_dir.display(),
        backlog = cfg.backlog,
        "Starting shelf"
    );

    let server = Server::bind(&cfg).await?;
    tokio::spawn(stop_on_signal(server.shutdown_handle()));

    server.run().await
}

async fn stop_on_signal(shutdown: Shutdown) {
    shutdown.trigger_on(shutdown_signal()).await;
}

/// Resolves on Ctrl-C or SIGTERM, or fails if neither can be listened for.
async fn shutdown_signal() -> std::io::Result<()> {
    let mut term = match signal(SignalKind::terminate()) {
        Ok(term) => term,
        Err(e) => {
            tracing::warn!(error = %e, "cannot listen for SIGTERM");
            return tokio::signal::ctrl_c().await;
        }
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for Ctrl-C");
                term.recv().await;
                Ok(())
            }
        },
        _ = term.recv() => Ok(()),
    }
}
