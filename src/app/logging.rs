use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};

use crate::app::{HarvestError, Result};

pub const LOG_FILE_NAME: &str = "scraper.log";

/// Append-only `scraper.log` in `dir`, which is created if missing.
pub fn log_file_appender(dir: &Path) -> Result<RollingFileAppender> {
    fs::create_dir_all(dir)?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(dir)
        .map_err(|e| HarvestError::Other(format!("Cannot open log file in {}: {}", dir.display(), e)))
}
