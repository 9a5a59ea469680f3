//! Guard list response envelope types.

use serde::Deserialize;

use super::error::GuardApiError;

/// One raw guard record as returned by the API.
///
/// The shape differs between endpoints (flat fields vs. a nested `uinfo`
/// object), so it is kept opaque until a variant normalises it.
pub type RawGuardEntry = serde_json::Value;

/// Message used when the API omits one on failure.
const UNKNOWN_ERROR_MESSAGE: &str = "未知错误";

/// Top-level response envelope shared by both `guardTab` endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct GuardListEnvelope {
    /// Status code; `0` means success.
    pub code: i64,
    /// Human-readable status message.
    #[serde(default)]
    pub message: Option<String>,
    /// Payload (absent or null on most failures).
    #[serde(default)]
    pub data: Option<GuardPageData>,
}

/// `data` object of the envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuardPageData {
    /// Guard records of the requested page.
    #[serde(default)]
    pub list: Option<Vec<RawGuardEntry>>,
    /// Highlighted top three guards (`topListNew`, first page only).
    #[serde(default)]
    pub top3: Option<Vec<RawGuardEntry>>,
    /// Paging block used by `guardList`.
    #[serde(default)]
    pub page_info: Option<PageInfo>,
    /// Summary block used by `topListNew`.
    #[serde(default)]
    pub info: Option<ListInfo>,
    /// Top-level total page count used by some responses.
    #[serde(default)]
    pub page: Option<u32>,
}

/// `data.page_info` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageInfo {
    /// Total number of pages.
    #[serde(default)]
    pub total_page: Option<u32>,
}

/// `data.info` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListInfo {
    /// Total number of pages.
    #[serde(default)]
    pub page: Option<u32>,
    /// Total number of guards.
    #[serde(default)]
    pub num: Option<u64>,
}

impl GuardPageData {
    /// Resolves the total page count.
    ///
    /// Order: `info.page`, `page_info.total_page`, `page`, then `1`.
    /// A reported `0` is treated as `1`.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.info
            .as_ref()
            .and_then(|i| i.page)
            .or_else(|| self.page_info.as_ref().and_then(|p| p.total_page))
            .or(self.page)
            .unwrap_or(1)
            .max(1)
    }
}

/// One successfully fetched page.
#[derive(Debug, Clone)]
pub struct GuardPage {
    /// Page number this batch belongs to.
    pub page: u32,
    /// Total page count reported by the API.
    pub total_pages: u32,
    /// Raw records in upstream order (`top3` first when present).
    pub entries: Vec<RawGuardEntry>,
}

impl GuardPage {
    /// Validates an envelope and extracts its records.
    ///
    /// # Errors
    ///
    /// Returns `GuardApiError::Upstream` if `code` is non-zero.
    pub fn from_envelope(envelope: GuardListEnvelope, page: u32) -> Result<Self, GuardApiError> {
        if envelope.code != 0 {
            return Err(GuardApiError::Upstream {
                page,
                code: envelope.code,
                message: envelope
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| String::from(UNKNOWN_ERROR_MESSAGE)),
            });
        }

        let data = envelope.data.unwrap_or_default();
        let total_pages = data.total_pages();
        let mut entries = data.top3.unwrap_or_default();
        entries.extend(data.list.unwrap_or_default());

        Ok(Self {
            page,
            total_pages,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn parse(json: &str) -> GuardListEnvelope {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_guard_list_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/bilibili/guard_list_page1.json");

        // Act
        let page = GuardPage::from_envelope(parse(json), 1).unwrap();

        // Assert
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.entries.len(), 3);
        assert_eq!(page.entries[0]["username"], "星海提督");
    }

    #[test]
    fn test_parse_top_list_fixture_puts_top3_first() {
        // Arrange
        let json = include_str!("../../../../fixtures/bilibili/top_list_new_page1.json");

        // Act
        let page = GuardPage::from_envelope(parse(json), 1).unwrap();

        // Assert
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.entries.len(), 3);
        assert_eq!(page.entries[0]["rank"], 1);
        assert_eq!(page.entries[2]["rank"], 3);
    }

    #[test]
    fn test_nonzero_code_is_upstream_error() {
        // Arrange
        let json = include_str!("../../../../fixtures/bilibili/guard_list_error.json");

        // Act
        let err = GuardPage::from_envelope(parse(json), 1).unwrap_err();

        // Assert
        assert!(err.is_upstream());
        assert!(err.to_string().contains("房间不存在"));
    }

    #[test]
    fn test_missing_message_uses_default() {
        // Arrange
        let envelope = parse(r#"{"code":-101}"#);

        // Act
        let err = GuardPage::from_envelope(envelope, 1).unwrap_err();

        // Assert
        assert!(err.to_string().contains(UNKNOWN_ERROR_MESSAGE));
    }

    #[test]
    fn test_total_pages_prefers_info_page() {
        // Arrange
        let envelope = parse(
            r#"{"code":0,"data":{"list":[],"info":{"page":4},"page_info":{"total_page":9},"page":7}}"#,
        );

        // Act
        let page = GuardPage::from_envelope(envelope, 1).unwrap();

        // Assert
        assert_eq!(page.total_pages, 4);
    }

    #[test]
    fn test_total_pages_falls_back_to_top_level_page() {
        // Arrange
        let envelope = parse(r#"{"code":0,"data":{"list":[],"page":3}}"#);

        // Act
        let page = GuardPage::from_envelope(envelope, 1).unwrap();

        // Assert
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_total_pages_defaults_to_one() {
        // Arrange
        let envelope = parse(r#"{"code":0,"data":{"list":null,"info":{"page":0}}}"#);

        // Act
        let page = GuardPage::from_envelope(envelope, 1).unwrap();

        // Assert
        assert_eq!(page.total_pages, 1);
        assert!(page.entries.is_empty());
    }

    #[test]
    fn test_missing_data_yields_empty_page() {
        // Arrange
        let envelope = parse(r#"{"code":0,"message":"0"}"#);

        // Act
        let page = GuardPage::from_envelope(envelope, 1).unwrap();

        // Assert
        assert_eq!(page.total_pages, 1);
        assert!(page.entries.is_empty());
    }
}
