//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Else if `XDG_CONFIG_HOME` is set, returns `$XDG_CONFIG_HOME/guardlist/config.toml`.
/// - Otherwise returns `~/.config/guardlist/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    config_path_from(dir.map(PathBuf::as_path), |key| std::env::var(key).ok())
}

fn config_path_from(dir: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }

    let base = match (env("XDG_CONFIG_HOME"), env("HOME")) {
        (Some(xdg), _) if !xdg.is_empty() => PathBuf::from(xdg),
        (_, Some(home)) => PathBuf::from(home).join(".config"),
        _ => bail!("neither XDG_CONFIG_HOME nor HOME is set; pass --dir"),
    };
    Ok(base.join("guardlist").join(CONFIG_FILE))
}
