use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::services::loader::BatchOutcome;

/// Default file name of the failure report
pub const DEFAULT_REPORT_PATH: &str = "errores_insert.txt";

/// Write one line per failed item to `path`.
///
/// Nothing is written for a clean batch. Returns whether a file was written.
pub fn write_report(outcome: &BatchOutcome, path: &Path) -> io::Result<bool> {
    if outcome.is_clean() {
        return Ok(false);
    }

    let mut writer = BufWriter::new(File::create(path)?);
    for failure in &outcome.failures {
        writeln!(writer, "{}", failure)?;
    }
    writer.flush()?;

    info!("Wrote {} failures to {}", outcome.failures.len(), path.display());
    Ok(true)
}
