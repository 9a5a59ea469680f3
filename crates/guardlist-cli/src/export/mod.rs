//! Guard list exporters (console table, JSON, XLSX).

mod console;
mod json;
mod xlsx;

use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Local};
use guardlist_api::bilibili::{Column, NormalizedGuardRecord};

pub use console::render_table;

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON array.
    Json,
    /// Single-sheet XLSX workbook.
    Xlsx,
}

impl ExportFormat {
    const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xlsx => "xlsx",
        }
    }
}

/// Where and how to write the guard list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    /// Output format.
    pub format: ExportFormat,
    /// Output file path.
    pub path: PathBuf,
}

impl ExportTarget {
    /// Writes `records` to the target file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or the file write fails.
    pub fn write(&self, columns: &[Column], records: &[NormalizedGuardRecord]) -> Result<()> {
        match self.format {
            ExportFormat::Json => json::write_json(&self.path, records),
            ExportFormat::Xlsx => xlsx::write_xlsx(&self.path, columns, records),
        }
    }
}

/// Decides whether and where to write a file.
///
/// - `-o FILE` writes JSON, or XLSX when `-e` is also given.
/// - `-e` alone writes XLSX to `guard_list_{room}_{timestamp}.xlsx`.
/// - Neither writes nothing.
pub fn plan_export(
    output: Option<&Path>,
    excel: bool,
    room_id: NonZeroU64,
    now: DateTime<Local>,
) -> Option<ExportTarget> {
    let format = if excel {
        ExportFormat::Xlsx
    } else {
        ExportFormat::Json
    };

    match output {
        Some(path) => Some(ExportTarget {
            format,
            path: path.to_path_buf(),
        }),
        None if excel => Some(ExportTarget {
            format,
            path: default_filename(room_id, format, now),
        }),
        None => None,
    }
}

/// Builds `guard_list_{room}_{YYYYmmdd_HHMMSS}.{ext}`.
fn default_filename(room_id: NonZeroU64, format: ExportFormat, now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!(
        "guard_list_{room_id}_{}.{}",
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    ))
}
