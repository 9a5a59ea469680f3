//! Guard list pagination.

use tracing::instrument;

use super::api::LocalGuardApi;
use super::error::GuardApiError;
use super::record::NormalizedGuardRecord;
use super::variant::GuardQuery;

/// Result of a fetch session.
#[derive(Debug, Clone, Default)]
pub struct GuardFetchOutcome {
    /// Normalised records in page order, upstream order within each page.
    pub records: Vec<NormalizedGuardRecord>,
    /// Total page count reported by the first page.
    pub total_pages: u32,
    /// Pages after the first that failed and were skipped.
    pub failed_pages: Vec<u32>,
}

impl GuardFetchOutcome {
    /// Returns `true` when every page was retrieved.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failed_pages.is_empty()
    }
}

/// Fetches every page of a guard list and normalises the records.
///
/// The first page decides the total page count. A failure on the first
/// page aborts the session; a failure on any later page is logged, recorded
/// in [`GuardFetchOutcome::failed_pages`] and skipped. Pages are requested
/// strictly in ascending order and never retried.
///
/// # Errors
///
/// Returns the first page's `GuardApiError` (transport, decode or upstream).
#[instrument(skip_all, fields(room_id = %query.room_id, variant = ?query.variant))]
pub async fn fetch_all_guards(
    api: &(impl LocalGuardApi + Sync),
    query: &GuardQuery,
) -> Result<GuardFetchOutcome, GuardApiError> {
    let variant = query.variant;

    let first = api.fetch_page(query, 1).await.inspect_err(|e| {
        tracing::error!(error = %e, "failed to fetch first guard list page");
    })?;

    let total_pages = first.total_pages;
    let mut outcome = GuardFetchOutcome {
        records: first.entries.iter().map(|raw| variant.normalize(raw)).collect(),
        total_pages,
        failed_pages: Vec::new(),
    };

    tracing::info!(
        page = 1,
        total_pages,
        fetched = first.entries.len(),
        "guard list page completed"
    );

    for page in 2..=total_pages {
        match api.fetch_page(query, page).await {
            Ok(batch) => {
                outcome
                    .records
                    .extend(batch.entries.iter().map(|raw| variant.normalize(raw)));
                tracing::info!(
                    page,
                    total_pages,
                    fetched = batch.entries.len(),
                    "guard list page completed"
                );
            }
            Err(e) => {
                tracing::warn!(page, error = %e, "failed to fetch guard list page, skipping");
                outcome.failed_pages.push(page);
            }
        }
    }

    tracing::info!(
        total = outcome.records.len(),
        pages = total_pages,
        skipped = outcome.failed_pages.len(),
        "guard list pagination completed"
    );

    Ok(outcome)
}
