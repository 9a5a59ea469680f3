//! Session cookie resolution.

use anyhow::{Result, bail};

use super::config::CredentialsConfig;

/// Full cookie string; overrides everything else.
pub const COOKIE_ENV: &str = "BILI_COOKIE";
/// `SESSDATA` value.
pub const SESSDATA_ENV: &str = "BILI_SESSDATA";
/// `bili_jct` value.
pub const BILI_JCT_ENV: &str = "BILI_JCT";

/// Resolves the session cookie sent to the API.
///
/// Order: `BILI_COOKIE`, then `SESSDATA` from `BILI_SESSDATA` or
/// `credentials.sessdata` (with optional `bili_jct` from `BILI_JCT` or
/// `credentials.bili_jct`). Empty values count as unset.
///
/// # Errors
///
/// Returns an error if no credential is available.
pub fn resolve_cookie(
    config: &CredentialsConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<String> {
    let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    if let Some(cookie) = lookup(COOKIE_ENV) {
        return Ok(cookie);
    }

    let sessdata = lookup(SESSDATA_ENV).or_else(|| non_empty(config.sessdata.as_deref()));
    let Some(sessdata) = sessdata else {
        bail!(
            "no session credential: set {COOKIE_ENV} or {SESSDATA_ENV}, \
             or credentials.sessdata in config.toml"
        );
    };

    let bili_jct = lookup(BILI_JCT_ENV).or_else(|| non_empty(config.bili_jct.as_deref()));
    Ok(bili_jct.map_or_else(
        || format!("SESSDATA={sessdata}"),
        |jct| format!("SESSDATA={sessdata}; bili_jct={jct}"),
    ))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(String::from)
}
