//! JSON export.

use std::path::Path;

use anyhow::{Context, Result};
use guardlist_api::bilibili::NormalizedGuardRecord;

/// Writes records as a pretty-printed UTF-8 JSON array.
///
/// Non-ASCII text is written as-is, not escaped.
///
/// # Errors
///
/// Returns an error if serialisation or the file write fails.
pub fn write_json(path: &Path, records: &[NormalizedGuardRecord]) -> Result<()> {
    let content =
        serde_json::to_string_pretty(records).context("failed to serialize guard list")?;
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
