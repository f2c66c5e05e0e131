use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "seed-exams")]
#[command(about = "Generate synthetic lab exams and load them into a sink")]
pub struct Cli {
    #[command(flatten)]
    pub batch: BatchArgs,

    #[command(subcommand)]
    pub target: Target,
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Number of records to generate
    #[arg(long, default_value_t = 20_000)]
    pub total: usize,

    /// RNG seed for a reproducible batch
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to write the failure report
    #[arg(long, default_value = clinic_hub_domain::report::DEFAULT_REPORT_PATH)]
    pub report: PathBuf,

    /// Extra attempts for records that hit a transport error
    #[arg(long, default_value_t = 0)]
    pub max_retries: u32,

    /// Pause before each retry, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub retry_delay_ms: u64,

    /// Log progress every N records (0 disables)
    #[arg(long, default_value_t = 1_000)]
    pub progress_every: usize,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Target {
    /// POST every record to the exams API
    Http {
        /// Exams endpoint
        #[arg(long, env = "EXAMS_API_URL", default_value = "http://localhost:8080/api/examenes")]
        url: String,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
    },
    /// Insert every record into the SQLite document store
    Store {
        /// Database file
        #[arg(long, env = "EXAMS_DB_PATH", default_value = "data/examenes.db")]
        db: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["seed-exams", "store", "--db", "x.db"]).unwrap();

        assert_eq!(cli.batch.total, 20_000);
        assert_eq!(cli.batch.seed, None);
        assert_eq!(cli.batch.report, PathBuf::from("errores_insert.txt"));
        assert_eq!(cli.batch.max_retries, 0);
        assert!(matches!(cli.target, Target::Store { ref db } if db == "x.db"));
    }

    #[test]
    fn test_http_target_with_batch_flags() {
        let cli = Cli::try_parse_from([
            "seed-exams",
            "--total",
            "50",
            "--seed",
            "7",
            "--max-retries",
            "2",
            "http",
            "--url",
            "http://exams.local/api/examenes",
        ])
        .unwrap();

        assert_eq!(cli.batch.total, 50);
        assert_eq!(cli.batch.seed, Some(7));
        assert_eq!(cli.batch.max_retries, 2);
        match cli.target {
            Target::Http { url, timeout_secs } => {
                assert_eq!(url, "http://exams.local/api/examenes");
                assert_eq!(timeout_secs, 10);
            }
            other => panic!("unexpected target {:?}", other),
        }
    }

    #[test]
    fn test_target_is_required() {
        assert!(Cli::try_parse_from(["seed-exams"]).is_err());
    }
}
