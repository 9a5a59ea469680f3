//! Endpoint variants and their field mapping strategies.

use std::num::NonZeroU64;

use super::record::{Column, Consumption, NormalizedGuardRecord, guard_level_label};
use super::types::RawGuardEntry;

/// Display name used when the record carries none.
const UNKNOWN_USERNAME: &str = "未知";

/// Columns exported for `guardList`.
const GUARD_LIST_COLUMNS: &[Column] = &[
    Column::Username,
    Column::Uid,
    Column::GuardLevel,
    Column::MedalLevel,
    Column::Consumption,
];

/// Columns exported for `topListNew`.
const TOP_LIST_COLUMNS: &[Column] = &[
    Column::Rank,
    Column::Username,
    Column::Uid,
    Column::GuardLevel,
    Column::MedalLevel,
    Column::Consumption,
    Column::Face,
];

/// Guard list endpoint variant.
///
/// Bundles the endpoint path, page size, query layout and record mapping
/// so that a single pagination routine serves both endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardListVariant {
    /// Legacy `guardList` endpoint with flat records.
    GuardList,
    /// `topListNew` endpoint with nested `uinfo` records.
    TopList,
}

impl GuardListVariant {
    /// Endpoint path relative to the API host.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::GuardList => "/xlive/app-room/v2/guardTab/guardList",
            Self::TopList => "/xlive/app-room/v2/guardTab/topListNew",
        }
    }

    /// Number of records requested per page.
    #[must_use]
    pub const fn page_size(self) -> u32 {
        match self {
            Self::GuardList => 30,
            Self::TopList => 20,
        }
    }

    /// Ordered export columns.
    #[must_use]
    pub const fn columns(self) -> &'static [Column] {
        match self {
            Self::GuardList => GUARD_LIST_COLUMNS,
            Self::TopList => TOP_LIST_COLUMNS,
        }
    }

    /// Builds the query string pairs for one page.
    ///
    /// `ruid` is only sent by `topListNew`, and only when present.
    #[must_use]
    pub fn query_pairs(self, query: &GuardQuery, page: u32) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = vec![("roomid", query.room_id.to_string())];
        if self == Self::TopList
            && let Some(ruid) = query.ruid
        {
            pairs.push(("ruid", ruid.to_string()));
        }
        pairs.push(("page", page.to_string()));
        pairs.push(("page_size", self.page_size().to_string()));
        if self == Self::TopList {
            pairs.push(("typ", String::from("0")));
        }
        pairs
    }

    /// Maps one raw record into a [`NormalizedGuardRecord`].
    ///
    /// Each field is read on its own: a missing field, or one with an
    /// unexpected JSON type, falls back to its default without affecting
    /// its siblings.
    #[must_use]
    pub fn normalize(self, raw: &RawGuardEntry) -> NormalizedGuardRecord {
        match self {
            Self::GuardList => normalize_guard_list(raw),
            Self::TopList => normalize_top_list(raw),
        }
    }
}

/// Parameters identifying the guard list to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardQuery {
    /// Endpoint variant.
    pub variant: GuardListVariant,
    /// Live room ID.
    pub room_id: NonZeroU64,
    /// Broadcaster account ID (`topListNew` only).
    pub ruid: Option<NonZeroU64>,
}

impl GuardQuery {
    /// Creates a query without a broadcaster ID.
    #[must_use]
    pub const fn new(variant: GuardListVariant, room_id: NonZeroU64) -> Self {
        Self {
            variant,
            room_id,
            ruid: None,
        }
    }

    /// Sets the broadcaster ID.
    #[must_use]
    pub const fn ruid(mut self, ruid: NonZeroU64) -> Self {
        self.ruid = Some(ruid);
        self
    }
}

// --- field access ---

/// Returns the value at `pointer`, treating JSON `null` as absent.
fn field<'a>(raw: &'a RawGuardEntry, pointer: &str) -> Option<&'a RawGuardEntry> {
    raw.pointer(pointer).filter(|value| !value.is_null())
}

/// Reads the value at `pointer` with `extract`, logging a type mismatch.
fn typed<T>(
    raw: &RawGuardEntry,
    pointer: &str,
    extract: impl FnOnce(&RawGuardEntry) -> Option<T>,
) -> Option<T> {
    let value = field(raw, pointer)?;
    let result = extract(value);
    if result.is_none() {
        tracing::warn!(field = pointer, %value, "unexpected guard record field type, using default");
    }
    result
}

fn text(raw: &RawGuardEntry, pointer: &str) -> Option<String> {
    typed(raw, pointer, |v| v.as_str().map(str::to_owned))
}

fn unsigned(raw: &RawGuardEntry, pointer: &str) -> Option<u64> {
    typed(raw, pointer, serde_json::Value::as_u64)
}

fn signed(raw: &RawGuardEntry, pointer: &str) -> Option<i64> {
    typed(raw, pointer, serde_json::Value::as_i64)
}

fn small(raw: &RawGuardEntry, pointer: &str) -> Option<u32> {
    typed(raw, pointer, |v| v.as_u64().and_then(|n| u32::try_from(n).ok()))
}

fn username(raw: &RawGuardEntry, pointer: &str) -> String {
    text(raw, pointer).unwrap_or_else(|| String::from(UNKNOWN_USERNAME))
}

// --- guardList ---

/// Maps a flat `guardList` record.
fn normalize_guard_list(raw: &RawGuardEntry) -> NormalizedGuardRecord {
    let consumption = match field(raw, "/price").and_then(serde_json::Value::as_u64) {
        Some(price) => Consumption::from_price(price),
        None => typed(raw, "/price", serde_json::Value::as_f64)
            .map_or_else(|| Consumption::from_price(0), Consumption::from_fractional_price),
    };

    NormalizedGuardRecord {
        username: username(raw, "/username"),
        uid: unsigned(raw, "/uid").unwrap_or(0),
        guard_level: guard_level_label(signed(raw, "/guard_level").unwrap_or(0)),
        medal_level: small(raw, "/medal_info/medal_level").unwrap_or(0),
        consumption,
        rank: None,
        face: None,
    }
}

// --- topListNew ---

/// Maps a nested `topListNew` record.
fn normalize_top_list(raw: &RawGuardEntry) -> NormalizedGuardRecord {
    let face = text(raw, "/uinfo/base/face")
        .map(|f| f.trim().to_owned())
        .unwrap_or_default();

    NormalizedGuardRecord {
        username: username(raw, "/uinfo/base/name"),
        uid: unsigned(raw, "/uinfo/uid").unwrap_or(0),
        guard_level: guard_level_label(signed(raw, "/uinfo/guard/level").unwrap_or(0)),
        medal_level: small(raw, "/uinfo/medal/level").unwrap_or(0),
        consumption: Consumption::Accompany(signed(raw, "/accompany").unwrap_or(0)),
        rank: Some(small(raw, "/rank").unwrap_or(0)),
        face: Some(face),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use serde_json::json;

    use super::*;

    fn room(id: u64) -> NonZeroU64 {
        NonZeroU64::new(id).unwrap()
    }

    #[test]
    fn test_guard_list_query_pairs() {
        // Arrange
        let query = GuardQuery::new(GuardListVariant::GuardList, room(21_452_505));

        // Act
        let pairs = GuardListVariant::GuardList.query_pairs(&query, 3);

        // Assert
        assert_eq!(
            pairs,
            vec![
                ("roomid", String::from("21452505")),
                ("page", String::from("3")),
                ("page_size", String::from("30")),
            ]
        );
    }

    #[test]
    fn test_top_list_query_pairs_with_ruid() {
        // Arrange
        let query = GuardQuery::new(GuardListVariant::TopList, room(100)).ruid(room(200));

        // Act
        let pairs = GuardListVariant::TopList.query_pairs(&query, 1);

        // Assert
        assert_eq!(
            pairs,
            vec![
                ("roomid", String::from("100")),
                ("ruid", String::from("200")),
                ("page", String::from("1")),
                ("page_size", String::from("20")),
                ("typ", String::from("0")),
            ]
        );
    }

    #[test]
    fn test_top_list_query_pairs_without_ruid() {
        // Arrange
        let query = GuardQuery::new(GuardListVariant::TopList, room(100));

        // Act
        let pairs = GuardListVariant::TopList.query_pairs(&query, 2);

        // Assert
        assert!(pairs.iter().all(|(k, _)| *k != "ruid"));
        assert_eq!(pairs.len(), 4);
    }

    #[test]
    fn test_normalize_guard_list_record() {
        // Arrange
        let raw = json!({
            "uid": 42,
            "username": "总督大人",
            "guard_level": 1,
            "medal_info": {"medal_level": 25},
            "price": 5000
        });

        // Act
        let record = GuardListVariant::GuardList.normalize(&raw);

        // Assert
        assert_eq!(record.username, "总督大人");
        assert_eq!(record.uid, 42);
        assert_eq!(record.guard_level, "总督");
        assert_eq!(record.medal_level, 25);
        assert_eq!(record.consumption, Consumption::Amount(String::from("5.0元")));
        assert_eq!(record.rank, None);
        assert_eq!(record.face, None);
    }

    #[test]
    fn test_normalize_guard_list_without_medal_info() {
        // Arrange
        let raw = json!({"uid": 7, "username": "a", "guard_level": 3, "price": 198_000});

        // Act
        let record = GuardListVariant::GuardList.normalize(&raw);

        // Assert
        assert_eq!(record.medal_level, 0);
        assert_eq!(record.consumption.to_string(), "198.0元");
    }

    #[test]
    fn test_normalize_guard_list_empty_record_uses_defaults() {
        // Arrange
        let raw = json!({});

        // Act
        let record = GuardListVariant::GuardList.normalize(&raw);

        // Assert
        assert_eq!(record.username, "未知");
        assert_eq!(record.uid, 0);
        assert_eq!(record.guard_level, "未知等级(0)");
        assert_eq!(record.consumption.to_string(), "0.0元");
    }

    #[test]
    fn test_normalize_top_list_record() {
        // Arrange
        let raw = json!({
            "rank": 4,
            "accompany": 88,
            "uinfo": {
                "uid": 9,
                "base": {"name": "青柠", "face": "\thttps://i0.hdslb.com/x.jpg \n"},
                "medal": {"level": 12},
                "guard": {"level": 2}
            }
        });

        // Act
        let record = GuardListVariant::TopList.normalize(&raw);

        // Assert
        assert_eq!(record.username, "青柠");
        assert_eq!(record.uid, 9);
        assert_eq!(record.guard_level, "提督");
        assert_eq!(record.medal_level, 12);
        assert_eq!(record.consumption, Consumption::Accompany(88));
        assert_eq!(record.rank, Some(4));
        assert_eq!(record.face.as_deref(), Some("https://i0.hdslb.com/x.jpg"));
    }

    #[test]
    fn test_normalize_top_list_unknown_guard_level() {
        // Arrange
        let raw = json!({"uinfo": {"uid": 1, "guard": {"level": 99}}});

        // Act
        let record = GuardListVariant::TopList.normalize(&raw);

        // Assert
        assert_eq!(record.guard_level, "未知等级(99)");
        assert_eq!(record.medal_level, 0);
        assert_eq!(record.rank, Some(0));
        assert_eq!(record.face.as_deref(), Some(""));
        assert_eq!(record.consumption, Consumption::Accompany(0));
    }

    #[test]
    fn test_normalize_bad_field_keeps_siblings() {
        // Arrange
        let raw = json!({
            "uid": "not-a-number",
            "username": "总督大人",
            "guard_level": 1,
            "medal_info": {"medal_level": 20},
            "price": 5000
        });

        // Act
        let record = GuardListVariant::GuardList.normalize(&raw);

        // Assert
        assert_eq!(record.uid, 0);
        assert_eq!(record.username, "总督大人");
        assert_eq!(record.guard_level, "总督");
        assert_eq!(record.medal_level, 20);
        assert_eq!(record.consumption.to_string(), "5.0元");
    }

    #[test]
    fn test_normalize_float_price() {
        // Arrange
        let raw = json!({
            "uid": 42,
            "username": "总督大人",
            "guard_level": 1,
            "medal_info": {"medal_level": 20},
            "price": 5000.0
        });

        // Act
        let record = GuardListVariant::GuardList.normalize(&raw);

        // Assert
        assert_eq!(record.username, "总督大人");
        assert_eq!(record.uid, 42);
        assert_eq!(record.guard_level, "总督");
        assert_eq!(record.consumption.to_string(), "5.0元");
    }

    #[test]
    fn test_normalize_odd_medal_and_null_fields_use_defaults() {
        // Arrange
        let raw = json!({
            "uid": 5,
            "username": null,
            "guard_level": "3",
            "medal_info": [],
            "price": "free"
        });

        // Act
        let record = GuardListVariant::GuardList.normalize(&raw);

        // Assert
        assert_eq!(record.uid, 5);
        assert_eq!(record.username, "未知");
        assert_eq!(record.guard_level, "未知等级(0)");
        assert_eq!(record.medal_level, 0);
        assert_eq!(record.consumption.to_string(), "0.0元");
    }

    #[test]
    fn test_normalize_top_list_bad_medal_keeps_name() {
        // Arrange
        let raw = json!({
            "rank": 2,
            "uinfo": {"uid": 8, "base": {"name": "白夜"}, "medal": {"level": "high"}}
        });

        // Act
        let record = GuardListVariant::TopList.normalize(&raw);

        // Assert
        assert_eq!(record.username, "白夜");
        assert_eq!(record.uid, 8);
        assert_eq!(record.medal_level, 0);
        assert_eq!(record.rank, Some(2));
    }

    #[test]
    fn test_columns_per_variant() {
        // Arrange & Act
        let legacy = GuardListVariant::GuardList.columns();
        let top = GuardListVariant::TopList.columns();

        // Assert
        assert_eq!(legacy.len(), 5);
        assert_eq!(legacy[0], Column::Username);
        assert_eq!(top.len(), 7);
        assert_eq!(top[0], Column::Rank);
        assert_eq!(top[6], Column::Face);
    }
}
