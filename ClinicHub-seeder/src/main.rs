mod cli;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use clinic_hub_data::database::{create_sqlite_pool, DatabaseConfig};
use clinic_hub_data::sink::{DocumentStoreSink, HttpExamSink};
use clinic_hub_domain::report::write_report;
use clinic_hub_domain::services::{BatchOutcome, BulkLoader, ExamGenerator, GeneratorConfig, LoaderConfig};

use crate::cli::{BatchArgs, Cli, Target};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(false)
                .with_timer(fmt::time::uptime()),
        )
        .with(env_filter)
        .init();

    let cli = Cli::parse();
    let outcome = seed(&cli.batch, &cli.target).await?;

    if outcome.is_clean() {
        info!("✅ Finished. {} records inserted, no failures", outcome.attempted);
        return Ok(ExitCode::SUCCESS);
    }

    write_report(&outcome, &cli.batch.report)
        .with_context(|| format!("Failed to write report to {}", cli.batch.report.display()))?;
    warn!(
        "❌ Finished with {} failures out of {} records, see {}",
        outcome.failures.len(),
        outcome.attempted,
        cli.batch.report.display()
    );
    Ok(ExitCode::FAILURE)
}

/// Build the sink for `target` and run one batch against it
async fn seed(batch: &BatchArgs, target: &Target) -> anyhow::Result<BatchOutcome> {
    let mut rng = match batch.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let loader_config = LoaderConfig {
        total: batch.total,
        progress_every: batch.progress_every,
        max_retries: batch.max_retries,
        retry_delay: Duration::from_millis(batch.retry_delay_ms),
    };

    let outcome = match target {
        Target::Http { url, timeout_secs } => {
            let sink = HttpExamSink::new(url.as_str(), Duration::from_secs(*timeout_secs))
                .context("Failed to build the HTTP client")?;
            info!("Target: exams API at {}", sink.url());
            let loader = BulkLoader::new(ExamGenerator::new(GeneratorConfig::for_exams_api()), loader_config);
            loader.run(&sink, &mut rng).await
        }
        Target::Store { db } => {
            info!("Target: document store at {}", db);
            let pool = create_sqlite_pool(&DatabaseConfig::with_path(db.as_str()))
                .with_context(|| format!("Failed to open the document store at {}", db))?;
            let sink = DocumentStoreSink::new(pool);
            let loader = BulkLoader::new(
                ExamGenerator::new(GeneratorConfig::for_document_store()),
                loader_config,
            );
            loader.run(&sink, &mut rng).await
        }
    };

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_hub_data::sink::FailureKind;
    use std::path::PathBuf;

    fn batch(total: usize) -> BatchArgs {
        BatchArgs {
            total,
            seed: Some(1),
            report: PathBuf::from("unused.txt"),
            max_retries: 0,
            retry_delay_ms: 0,
            progress_every: 0,
        }
    }

    #[tokio::test]
    async fn test_store_target_inserts_every_record() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("exams.db").to_string_lossy().to_string();

        let outcome = seed(&batch(25), &Target::Store { db: db.clone() }).await.unwrap();

        assert!(outcome.is_clean());
        assert_eq!(outcome.attempted, 25);

        let pool = create_sqlite_pool(&DatabaseConfig::with_path(db)).unwrap();
        assert_eq!(DocumentStoreSink::new(pool).count().unwrap(), 25);
    }

    #[tokio::test]
    async fn test_unreachable_api_records_transport_failures() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/api/examenes", listener.local_addr().unwrap());
        drop(listener);

        let outcome = seed(&batch(3), &Target::Http { url, timeout_secs: 1 }).await.unwrap();

        assert_eq!(outcome.attempted, 3);
        assert_eq!(outcome.failures.len(), 3);
        assert!(outcome
            .failures
            .iter()
            .all(|f| f.kind == FailureKind::TransportError));
    }
}
