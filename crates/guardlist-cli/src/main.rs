//! guardlist - Bilibili live room guard list exporter.

/// Application configuration (TOML + environment).
mod config;
/// Console, JSON and XLSX exporters.
mod export;

use std::num::NonZeroU64;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path, resolve_cookie};
use crate::export::{plan_export, render_table};
use guardlist_api::bilibili::{
    FixtureGuardApi, GuardFetchOutcome, GuardListVariant, GuardQuery, LiveClient,
    fetch_all_guards,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Fetch the guard list from the legacy `guardList` endpoint.
    GuardList(GuardListArgs),
    /// Fetch the guard list from the `topListNew` endpoint.
    TopList(TopListArgs),
}

/// Arguments for the `guard-list` subcommand.
#[derive(clap::Args)]
struct GuardListArgs {
    /// Live room ID.
    room_id: NonZeroU64,

    /// Output options.
    #[command(flatten)]
    export: ExportArgs,
}

/// Arguments for the `top-list` subcommand.
#[derive(clap::Args)]
struct TopListArgs {
    /// Live room ID.
    room_id: NonZeroU64,

    /// Broadcaster UID (`ruid`).
    ruid: Option<NonZeroU64>,

    /// Output options.
    #[command(flatten)]
    export: ExportArgs,
}

/// Output options shared by all subcommands.
#[derive(clap::Args)]
struct ExportArgs {
    /// Output file name.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export as XLSX instead of JSON.
    #[arg(short, long)]
    excel: bool,

    /// Read responses from a local JSON file instead of the network.
    #[arg(long, value_name = "PATH")]
    fixture: Option<PathBuf>,
}

/// Builds a `LiveClient` from `config.toml` and the credential environment.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, no session credential
/// is available, or the client fails to build.
#[instrument(skip_all)]
fn build_live_client(dir: Option<&PathBuf>) -> Result<LiveClient> {
    let config_path = resolve_config_path(dir)?;
    let config = AppConfig::load(&config_path)?;
    tracing::debug!(path = %config_path.display(), "config loaded");

    let cookie = resolve_cookie(&config.credentials, |key| std::env::var(key).ok())?;

    let mut builder = LiveClient::builder()
        .user_agent(config.http.user_agent())
        .cookie(cookie);
    if let Some(ref base_url) = config.http.base_url {
        let url = base_url
            .parse::<Url>()
            .with_context(|| format!("invalid http.base_url: {base_url}"))?;
        builder = builder.base_url(url);
    }
    if let Some(ref referer) = config.http.referer {
        builder = builder.referer(referer.clone());
    }
    if let Some(secs) = config.http.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build().context("failed to build API client")
}

/// Fetches the guard list from the network or, in diagnostic mode, a fixture.
///
/// # Errors
///
/// Returns an error if the client or fixture cannot be set up, or the first
/// page cannot be fetched.
#[instrument(skip_all)]
async fn fetch_guards(
    query: &GuardQuery,
    fixture: Option<&PathBuf>,
    dir: Option<&PathBuf>,
) -> Result<GuardFetchOutcome> {
    let result = if let Some(path) = fixture {
        tracing::info!(path = %path.display(), "Diagnostic mode: reading responses from fixture");
        let api = FixtureGuardApi::from_path(path).context("failed to load fixture")?;
        fetch_all_guards(&api, query).await
    } else {
        let client = build_live_client(dir)?;
        fetch_all_guards(&client, query).await
    };

    result.with_context(|| format!("failed to fetch guard list of room {}", query.room_id))
}

/// Runs a guard list subcommand: fetch, print, and optionally save.
///
/// # Errors
///
/// Returns an error if fetching fails or the output file cannot be written.
#[instrument(skip_all, fields(room_id = %query.room_id))]
async fn run_guard_list(query: GuardQuery, args: &ExportArgs, dir: Option<&PathBuf>) -> Result<()> {
    let outcome = fetch_guards(&query, args.fixture.as_ref(), dir).await?;

    if !outcome.is_complete() {
        tracing::warn!(
            failed_pages = ?outcome.failed_pages,
            total_pages = outcome.total_pages,
            "Some pages could not be fetched; the guard list is incomplete"
        );
    }

    if outcome.records.is_empty() {
        tracing::warn!("未获取到舰长信息");
        return Ok(());
    }

    let columns = query.variant.columns();
    for line in render_table(query.room_id, columns, &outcome.records) {
        tracing::info!("{}", line);
    }

    if let Some(target) = plan_export(
        args.output.as_deref(),
        args.excel,
        query.room_id,
        Local::now(),
    ) {
        target.write(columns, &outcome.records)?;
        tracing::info!("舰长信息已保存到 {}", target.path.display());
    }

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::GuardList(args) => {
            let query = GuardQuery::new(GuardListVariant::GuardList, args.room_id);
            run_guard_list(query, &args.export, cli.dir.as_ref()).await
        }
        Commands::TopList(args) => {
            let mut query = GuardQuery::new(GuardListVariant::TopList, args.room_id);
            if let Some(ruid) = args.ruid {
                query = query.ruid(ruid);
            }
            run_guard_list(query, &args.export, cli.dir.as_ref()).await
        }
    }
}
