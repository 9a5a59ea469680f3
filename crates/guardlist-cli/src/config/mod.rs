//! Application configuration module.
//!
//! Manages the TOML config file (HTTP overrides and session credentials)
//! and resolves the session cookie from the environment.

#[allow(clippy::module_inception)]
mod config;
mod credentials;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use credentials::resolve_cookie;
pub use paths::resolve_config_path;
