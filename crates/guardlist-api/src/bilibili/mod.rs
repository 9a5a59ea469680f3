//! Bilibili live guard list API module.
//!
//! Handles HTTP requests to the `guardTab` endpoints of
//! `api.live.bilibili.com`, walks their page sequence and normalises
//! the returned guard records.

mod api;
mod client;
mod error;
mod fetch;
mod fixture;
mod record;
mod types;
mod variant;

#[allow(clippy::module_name_repetitions)]
pub use api::{GuardApi, LocalGuardApi};
pub use client::{LiveClient, LiveClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::GuardApiError;
pub use fetch::{GuardFetchOutcome, fetch_all_guards};
pub use fixture::FixtureGuardApi;
pub use record::{CellValue, Column, Consumption, NormalizedGuardRecord, guard_level_label};
pub use types::{GuardListEnvelope, GuardPage, GuardPageData, RawGuardEntry};
pub use variant::{GuardListVariant, GuardQuery};
