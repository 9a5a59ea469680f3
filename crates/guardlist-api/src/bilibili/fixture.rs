//! `FixtureGuardApi` - serves guard list pages from a local JSON file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::instrument;

use super::api::LocalGuardApi;
use super::error::GuardApiError;
use super::types::{GuardListEnvelope, GuardPage};
use super::variant::GuardQuery;

/// HTTP status reported for pages the fixture does not contain.
const MISSING_PAGE_STATUS: u16 = 404;

/// Guard list API backed by a captured response file.
///
/// The file holds either a single envelope (served as page 1) or an array
/// of envelopes, where element `N - 1` is served as page `N`.
#[derive(Debug)]
pub struct FixtureGuardApi {
    path: PathBuf,
    pages: Vec<serde_json::Value>,
}

impl FixtureGuardApi {
    /// Loads a fixture file.
    ///
    /// # Errors
    ///
    /// Returns `GuardApiError::Fixture` if the file cannot be read and
    /// `GuardApiError::Decode` if it is not valid JSON.
    pub fn from_path(path: &Path) -> Result<Self, GuardApiError> {
        let content = std::fs::read_to_string(path).map_err(|source| GuardApiError::Fixture {
            path: path.to_path_buf(),
            source,
        })?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .map_err(|source| GuardApiError::Decode { page: 1, source })?;

        let pages = match value {
            serde_json::Value::Array(items) => items,
            single => vec![single],
        };

        tracing::debug!(path = %path.display(), pages = pages.len(), "fixture loaded");

        Ok(Self {
            path: path.to_path_buf(),
            pages,
        })
    }
}

impl LocalGuardApi for FixtureGuardApi {
    #[instrument(skip_all, fields(page = page))]
    async fn fetch_page(&self, query: &GuardQuery, page: u32) -> Result<GuardPage, GuardApiError> {
        tracing::debug!(
            path = %self.path.display(),
            room_id = %query.room_id,
            "serving guard list page from fixture"
        );

        let index = usize::try_from(page.saturating_sub(1)).unwrap_or(usize::MAX);
        let Some(raw) = self.pages.get(index) else {
            return Err(GuardApiError::Transport {
                page,
                status: MISSING_PAGE_STATUS,
            });
        };

        let envelope = GuardListEnvelope::deserialize(raw)
            .map_err(|source| GuardApiError::Decode { page, source })?;
        GuardPage::from_envelope(envelope, page)
    }
}
