//! Ingestion boundary: read a batch of raw issue records from disk.
//!
//! A batch is either one JSON array of records or JSON Lines (one record per
//! line, blank lines skipped). Conversion from other formats happens upstream.

use crate::error::Result;
use crate::types::RawIssue;
use std::path::Path;

/// Parse a batch from text, detecting array vs. JSON Lines by the first non-blank character
pub fn parse_raw_issues(contents: &str) -> Result<Vec<RawIssue>> {
    if contents.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(contents)?);
    }

    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str::<RawIssue>(line).map_err(Into::into))
        .collect()
}

/// Read and parse a batch file
pub fn load_raw_issues<P: AsRef<Path>>(path: P) -> Result<Vec<RawIssue>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let records = parse_raw_issues(&contents)?;
    log::info!("Loaded {} raw issues from {}", records.len(), path.display());
    Ok(records)
}
