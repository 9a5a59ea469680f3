//! Fixed-width console table.

use std::num::NonZeroU64;

use guardlist_api::bilibili::{Column, NormalizedGuardRecord};

/// Width of the horizontal rules.
const RULE_WIDTH: usize = 80;

/// Renders the guard table as lines, ready to be logged one by one.
#[must_use]
pub fn render_table(
    room_id: NonZeroU64,
    columns: &[Column],
    records: &[NormalizedGuardRecord],
) -> Vec<String> {
    let rule = "-".repeat(RULE_WIDTH);
    let mut lines = Vec::with_capacity(records.len().saturating_add(4));

    lines.push(format!(
        "直播间 {room_id} 的舰长列表 ({}人):",
        records.len()
    ));
    lines.push(rule.clone());
    lines.push(render_row(
        columns
            .iter()
            .map(|c| (*c, String::from(c.header()))),
    ));
    lines.push(rule);

    for record in records {
        lines.push(render_row(
            columns.iter().map(|c| (*c, c.cell(record).to_string())),
        ));
    }

    lines
}

/// Left-aligns each cell to its column width (counted in characters).
fn render_row(cells: impl Iterator<Item = (Column, String)>) -> String {
    let mut row = String::new();
    for (column, text) in cells {
        match column.console_width() {
            Some(width) => row.push_str(&format!("{text:<width$}")),
            None => row.push_str(&text),
        }
    }
    row.trim_end().to_owned()
}
