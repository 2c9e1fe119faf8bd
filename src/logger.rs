//! Plain-text crawl log: one tab-separated line per fetched URL,
//! followed by a human-readable summary block once the run drains.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::state::Summary;
use crate::Result;

/// Appends one tab-separated line per URL and writes the final summary.
/// Every per-URL write is flushed before returning, so the log file is
/// always consistent with what has actually been fetched.
pub struct Logger {
    writer: Mutex<BufWriter<File>>,
}

impl Logger {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Appends one per-URL record: `url, timestamp, content_length,
    /// depth, status_code, priority` as six tab-separated fields.
    pub fn log_url(
        &self,
        url: &str,
        timestamp: DateTime<Utc>,
        content_length: u64,
        depth: u32,
        status_code: u16,
        priority: f64,
    ) -> Result<()> {
        let mut writer = self.writer.lock();
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{:.6}",
            url,
            timestamp.to_rfc3339(),
            content_length,
            depth,
            status_code,
            priority
        )?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the end-of-run summary block.
    pub fn write_summary(&self, summary: &Summary, elapsed_secs: f64, debug: bool) -> Result<()> {
        let mut writer = self.writer.lock();

        writeln!(writer)?;
        writeln!(writer, "=== crawl summary ===")?;
        writeln!(writer, "total pages: {}", summary.total_pages)?;
        writeln!(writer, "total bytes: {}", summary.total_bytes)?;
        writeln!(writer, "elapsed seconds: {:.2}", elapsed_secs)?;

        writeln!(writer, "status counts:")?;
        for (code, count) in &summary.status_counts {
            writeln!(writer, "  {}: {}", code, count)?;
        }

        writeln!(writer, "successful pages: {}", summary.total_successful_pages)?;

        writeln!(writer, "pages per registered domain:")?;
        for (domain, count) in &summary.pages_per_registered_domain {
            writeln!(writer, "  {}: {}", domain, count)?;
        }

        if debug {
            writeln!(writer, "skipped (invalid): {}", summary.skipped_invalid)?;
            writeln!(writer, "skipped (duplicate): {}", summary.skipped_dupes)?;
            writeln!(writer, "skipped (robots): {}", summary.skipped_robots)?;
            writeln!(writer, "skipped (timeout-blocked): {}", summary.skipped_timeout)?;
        }

        writer.flush()?;
        Ok(())
    }
}
