//! XLSX export.

use std::path::Path;

use anyhow::{Context, Result};
use guardlist_api::bilibili::{CellValue, Column, NormalizedGuardRecord};
use rust_xlsxwriter::{Format, FormatAlign, Workbook};

/// Worksheet name.
const SHEET_NAME: &str = "舰长列表";

/// Writes records to a single-sheet workbook.
///
/// Row 1 holds bold, centred headers; each record follows on its own row.
/// Column widths follow the longest cell text.
///
/// # Errors
///
/// Returns an error if the workbook cannot be built or saved.
pub fn write_xlsx(path: &Path, columns: &[Column], records: &[NormalizedGuardRecord]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .context("failed to name worksheet")?;

    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    for (col_idx, column) in columns.iter().enumerate() {
        let col = u16::try_from(col_idx).context("too many columns")?;
        worksheet
            .write_string_with_format(0, col, column.header(), &header_format)
            .context("failed to write header")?;

        for (row_idx, record) in records.iter().enumerate() {
            let row = u32::try_from(row_idx)
                .ok()
                .and_then(|r| r.checked_add(1))
                .context("too many rows")?;
            let result = match column.cell(record) {
                CellValue::Text(text) => worksheet.write_string(row, col, text),
                CellValue::Number(value) => worksheet.write_number(row, col, value),
            };
            result.with_context(|| format!("failed to write cell ({row}, {col})"))?;
        }
    }

    for (col_idx, width) in column_widths(columns, records).into_iter().enumerate() {
        let col = u16::try_from(col_idx).context("too many columns")?;
        worksheet
            .set_column_width(col, width)
            .context("failed to set column width")?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Computes `(longest text + 2) * 1.2` per column, header included.
fn column_widths(columns: &[Column], records: &[NormalizedGuardRecord]) -> Vec<f64> {
    columns
        .iter()
        .map(|column| {
            let longest = records
                .iter()
                .map(|r| column.cell(r).to_string().chars().count())
                .chain(std::iter::once(column.header().chars().count()))
                .max()
                .unwrap_or(0);
            let chars = u32::try_from(longest).unwrap_or(u32::MAX).saturating_add(2);
            f64::from(chars) * 1.2
        })
        .collect()
}
