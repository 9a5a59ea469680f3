//! Normalised guard record and export column definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Flat guard record produced from either endpoint shape.
///
/// Serialised keys match the exported JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedGuardRecord {
    /// Display name.
    #[serde(rename = "用户名")]
    pub username: String,
    /// User ID.
    pub uid: u64,
    /// Guard tier label (see [`guard_level_label`]).
    #[serde(rename = "舰长等级")]
    pub guard_level: String,
    /// Fan medal level (`0` when the user wears none).
    #[serde(rename = "勋章等级")]
    pub medal_level: u32,
    /// Spending (`guardList`) or accompany figure (`topListNew`).
    #[serde(rename = "消费")]
    pub consumption: Consumption,
    /// Rank in the guard list (`topListNew` only).
    #[serde(rename = "排名", default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    /// Avatar URL, trimmed (`topListNew` only).
    #[serde(rename = "头像", default, skip_serializing_if = "Option::is_none")]
    pub face: Option<String>,
}

/// Consumption figure; its representation depends on the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Consumption {
    /// Formatted amount in yuan, e.g. `"5.0元"`.
    Amount(String),
    /// Raw `accompany` integer.
    Accompany(i64),
}

impl Consumption {
    /// Formats a raw `price` (in 1/1000 yuan) as currency text.
    #[must_use]
    pub fn from_price(price: u64) -> Self {
        Self::from_fractional_price(u64_to_f64(price))
    }

    /// Formats a price that arrived as a JSON float, e.g. `5000.0` -> `"5.0元"`.
    #[must_use]
    pub fn from_fractional_price(price: f64) -> Self {
        let yuan = price / 1000.0;
        Self::Amount(format!("{yuan:.1}元"))
    }
}

impl fmt::Display for Consumption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(text) => f.write_str(text),
            Self::Accompany(value) => write!(f, "{value}"),
        }
    }
}

/// Translates a numeric guard level into its display label.
///
/// Total over all integers: unknown levels produce `未知等级(N)`.
#[must_use]
pub fn guard_level_label(level: i64) -> String {
    match level {
        1 => String::from("总督"),
        2 => String::from("提督"),
        3 => String::from("舰长"),
        other => format!("未知等级({other})"),
    }
}

/// Exported column of a guard table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Rank.
    Rank,
    /// Display name.
    Username,
    /// User ID.
    Uid,
    /// Guard tier label.
    GuardLevel,
    /// Fan medal level.
    MedalLevel,
    /// Consumption figure.
    Consumption,
    /// Avatar URL.
    Face,
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Text cell.
    Text(String),
    /// Numeric cell.
    Number(f64),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

impl Column {
    /// Header label.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Rank => "排名",
            Self::Username => "用户名",
            Self::Uid => "UID",
            Self::GuardLevel => "舰长等级",
            Self::MedalLevel => "勋章等级",
            Self::Consumption => "消费",
            Self::Face => "头像",
        }
    }

    /// Fixed console width in characters (`None` for the trailing column).
    #[must_use]
    pub const fn console_width(self) -> Option<usize> {
        match self {
            Self::Rank => Some(6),
            Self::Username => Some(20),
            Self::Uid => Some(15),
            Self::GuardLevel | Self::MedalLevel | Self::Consumption => Some(10),
            Self::Face => None,
        }
    }

    /// Extracts this column's value from a record.
    #[must_use]
    pub fn cell(self, record: &NormalizedGuardRecord) -> CellValue {
        match self {
            Self::Rank => CellValue::Number(f64::from(record.rank.unwrap_or(0))),
            Self::Username => CellValue::Text(record.username.clone()),
            Self::Uid => CellValue::Number(u64_to_f64(record.uid)),
            Self::GuardLevel => CellValue::Text(record.guard_level.clone()),
            Self::MedalLevel => CellValue::Number(f64::from(record.medal_level)),
            Self::Consumption => match &record.consumption {
                Consumption::Amount(text) => CellValue::Text(text.clone()),
                Consumption::Accompany(value) => CellValue::Number(i64_to_f64(*value)),
            },
            Self::Face => CellValue::Text(record.face.clone().unwrap_or_default()),
        }
    }
}

/// Converts an ID to `f64` for spreadsheet cells.
#[allow(clippy::as_conversions, clippy::cast_precision_loss)]
fn u64_to_f64(value: u64) -> f64 {
    value as f64
}

#[allow(clippy::as_conversions, clippy::cast_precision_loss)]
fn i64_to_f64(value: i64) -> f64 {
    value as f64
}
