#![doc = include_str!("../README.md")]

mod config;
mod telemetry;

use anyhow::Context;
use clap::Parser;
use config::{CliArgs, Config};
use idforge::{BatchOrchestrator, ExportPayload, IdentifierJob, JobStatus, export_job};
use std::io::Write;
use std::path::Path;
use telemetry::init_telemetry;
use tokio::signal;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = Config::try_from(args)?;

    init_telemetry()?;
    log_startup_info(&config);

    let orchestrator = BatchOrchestrator::new();
    let format = config.settings.export_format;
    let job = orchestrator.prepare(config.name, config.settings)?;
    let mut handle = orchestrator.start(job)?;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);
    let mut cancelled = false;
    loop {
        tokio::select! {
            () = &mut shutdown, if !cancelled => {
                cancelled = true;
                if let Err(e) = handle.cancel() {
                    tracing::warn!("Could not cancel job: {e}");
                }
            },
            event = handle.next_event() => {
                let Some(snapshot) = event else { break };
                tracing::info!(
                    status = %snapshot.status,
                    generated = snapshot.items.len(),
                    total = snapshot.count,
                    "Progress {:.0}%",
                    snapshot.progress * 100.0
                );
            },
        }
    }

    let job = handle.wait().await?;
    log_summary(&job);

    if !job.items.is_empty() {
        let payload = export_job(&job, format)?;
        write_payload(&payload, config.output.as_deref())?;
    }

    if job.status == JobStatus::Failed {
        anyhow::bail!(
            "Job {} failed: {}",
            job.id,
            job.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}

fn log_startup_info(config: &Config) {
    if let Some(kind) = &config.unknown_kind {
        tracing::warn!(
            "Unrecognised kind `{kind}`, generating {} instead",
            config.settings.kind
        );
    }
    for warning in &config.warnings {
        tracing::warn!(field = %warning.field, "{}", warning.message);
    }
    if cfg!(debug_assertions) {
        tracing::info!("Starting job with full config: {:#?}", config);
    } else {
        tracing::info!(
            "Starting job `{}`: {} x {} in chunks of {}",
            config.name,
            config.settings.count,
            config.settings.kind,
            config.settings.chunk_size
        );
    }
}

fn log_summary(job: &IdentifierJob) {
    let Some(stats) = &job.statistics else {
        return;
    };
    tracing::info!(
        status = %job.status,
        valid = stats.valid_count,
        invalid = stats.invalid_count,
        duplicates = stats.duplicate_count,
        elapsed_ms = stats.generation_time_ms,
        "Generated {} identifiers (quality {:.1}, security {:.1}, entropy {:.1} bits)",
        stats.total_generated,
        stats.average_quality,
        stats.average_security,
        stats.average_entropy
    );
}

/// Writes to `output`, or stdout when none is given. A directory receives the
/// payload's suggested filename.
fn write_payload(payload: &ExportPayload, output: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = output else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(payload.content.as_bytes())?;
        if !payload.content.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        stdout.flush()?;
        return Ok(());
    };

    let target = if path.is_dir() {
        path.join(&payload.filename)
    } else {
        path.to_path_buf()
    };
    std::fs::write(&target, &payload.content)
        .with_context(|| format!("failed to write {}", target.display()))?;
    tracing::info!(mime = payload.mime_type, "Export written to {}", target.display());
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C signal"),
        () = terminate => tracing::info!("Received SIGTERM signal"),
    }
    tracing::info!("Cancelling job at the next chunk boundary...");
}
