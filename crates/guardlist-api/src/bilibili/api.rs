//! `GuardApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::GuardApiError;
use super::types::GuardPage;
use super::variant::GuardQuery;

/// Guard list API trait.
///
/// Abstracts page retrieval so the pagination routine can run against the
/// live HTTP client, a local fixture file, or a mock in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(GuardApi: Send)]
pub trait LocalGuardApi {
    /// Fetches one page of the guard list.
    ///
    /// # Errors
    ///
    /// Returns `GuardApiError::Transport`/`Request` if the HTTP layer fails,
    /// `Decode` if the body is not a valid envelope, and `Upstream` if the
    /// envelope reports a non-zero code.
    async fn fetch_page(&self, query: &GuardQuery, page: u32) -> Result<GuardPage, GuardApiError>;
}
