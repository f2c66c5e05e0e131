//! Bulk loading of generated exam records into a sink.
//!
//! Items are generated and submitted one at a time, in index order starting
//! at 1. A failed item is recorded and the batch moves on; the loop always
//! attempts every index.

use std::fmt;
use std::time::Duration;

use rand::RngCore;
use tracing::{info, instrument, warn};

use clinic_hub_data::sink::{ExamSink, FailureKind, SinkError};

use crate::entities::exam::ExamRecord;
use crate::services::generator::ExamGenerator;

/// Batch size and retry policy
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Number of records to generate and submit
    pub total: usize,
    /// Log a progress line every this many items (0 disables)
    pub progress_every: usize,
    /// Extra attempts for an item that failed with a transport error
    pub max_retries: u32,
    /// Pause before each retry
    pub retry_delay: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            total: 20_000,
            progress_every: 1_000,
            max_retries: 0,
            retry_delay: Duration::from_millis(500),
        }
    }
}

/// One failed item of a batch
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFailure {
    /// 1-based position in the batch
    pub index: usize,
    pub kind: FailureKind,
    pub detail: String,
}

impl fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record {} - Error: {} - {}", self.index, self.kind, self.detail)
    }
}

/// Result of one batch run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// Items for which a submission was attempted
    pub attempted: usize,
    /// Failed items in index order
    pub failures: Vec<ItemFailure>,
}

impl BatchOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.attempted - self.failures.len()
    }

    fn record_failure(&mut self, index: usize, error: SinkError) {
        warn!("Record {} failed: {} - {}", index, error.kind(), error.detail());
        self.failures.push(ItemFailure {
            index,
            kind: error.kind(),
            detail: error.detail().to_string(),
        });
    }
}

/// Drives the generator and submits every record to a sink
#[derive(Debug, Clone, Default)]
pub struct BulkLoader {
    generator: ExamGenerator,
    config: LoaderConfig,
}

impl BulkLoader {
    pub fn new(generator: ExamGenerator, config: LoaderConfig) -> Self {
        Self { generator, config }
    }

    /// Generate and submit `config.total` records, collecting per-item failures
    #[instrument(skip(self, sink, rng), fields(total = self.config.total))]
    pub async fn run<S, R>(&self, sink: &S, rng: &mut R) -> BatchOutcome
    where
        S: ExamSink + Sync + ?Sized,
        R: RngCore + ?Sized,
    {
        let total = self.config.total;
        let mut outcome = BatchOutcome::default();
        info!("Inserting {} exam records", total);

        for index in 1..=total {
            let record = self.generator.generate(rng, index);
            outcome.attempted += 1;

            if let Err(error) = self.submit_with_retry(sink, &record, index).await {
                outcome.record_failure(index, error);
            }

            if self.config.progress_every > 0 && index % self.config.progress_every == 0 {
                info!("Progress: {}/{} records, {} failures", index, total, outcome.failures.len());
            }
        }

        info!(
            "Finished: {} attempted, {} failures",
            outcome.attempted,
            outcome.failures.len()
        );
        outcome
    }

    async fn submit_with_retry<S>(&self, sink: &S, record: &ExamRecord, index: usize) -> Result<(), SinkError>
    where
        S: ExamSink + Sync + ?Sized,
    {
        let mut retries_left = self.config.max_retries;

        loop {
            match sink.submit(record).await {
                Err(SinkError::Transport(detail)) if retries_left > 0 => {
                    retries_left -= 1;
                    warn!("Record {} transport failure, retrying: {}", index, detail);
                    tokio::time::sleep(self.config.retry_delay).await;
                }
                result => return result,
            }
        }
    }
}
