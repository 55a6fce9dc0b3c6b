//! # CineVerse ingest (`cv-ingest`)
//!
//! Reads movie records from a JSON Lines file, splits them into batches and
//! pushes them to the bulk index with retry and exponential backoff.
//!
//! ```bash
//! cv-ingest --input movies.jsonl --namespace movies --batch-size 100
//!
//! # Continue a run that stopped after batch 41 was delivered
//! cv-ingest --input movies.jsonl --resume-after 41
//! ```
//!
//! Endpoint, API key and retry settings come from the environment
//! (`BULK_ENDPOINT`, `BULK_API_KEY`, `UPLOAD_*`). The process exits non-zero
//! when a batch cannot be delivered.

mod cli;
mod logging;
mod records;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use cv_core::domain::entities::upload::UploadBatch;
use cv_core::errors::UploadError;
use cv_shared::config::AppConfig;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Loads .env first so clap's env fallbacks see it
    let mut config = AppConfig::from_env();
    let cli = Cli::parse();
    logging::init_tracing(&config.logging);
    cli.apply(&mut config.upload);

    match run(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), event = "ingest_failed", "Ingest failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    let records = records::read_records(&cli.input)?;
    let total = records.len();
    let batches = UploadBatch::chunk(records, config.upload.batch_size);

    tracing::info!(
        input = %cli.input.display(),
        namespace = %config.upload.namespace,
        records = total,
        batches = batches.len(),
        resume_after = ?cli.resume_after,
        event = "ingest_started",
        "Starting bulk upload"
    );

    let uploader = Arc::new(
        cv_infra::build_uploader(&config.upload).context("bulk destination is not configured")?,
    );
    let outcome = uploader
        .spawn(config.upload.namespace.clone(), batches, cli.resume_after)
        .await
        .context("upload task did not complete")?;

    match outcome {
        Ok(report) => {
            tracing::info!(
                delivered = report.delivered,
                skipped = report.skipped,
                attempts = report.attempts,
                event = "ingest_completed",
                "Bulk upload finished"
            );
            Ok(())
        }
        Err(e) => {
            log_resume_hint(&e, cli.resume_after);
            Err(e.into())
        }
    }
}

/// Tell the operator which `--resume-after` continues the run
fn log_resume_hint(error: &UploadError, resumed_after: Option<usize>) {
    let last_done = error.batch_index().checked_sub(1).or(resumed_after);
    match last_done {
        Some(index) => tracing::warn!(
            failed_batch = error.batch_index(),
            delivered = error.delivered(),
            completed = error.completed(),
            event = "ingest_resume_hint",
            "Rerun with --resume-after {} to continue",
            index
        ),
        None => tracing::warn!(
            failed_batch = error.batch_index(),
            event = "ingest_resume_hint",
            "Nothing was delivered; rerun without --resume-after"
        ),
    }
}
