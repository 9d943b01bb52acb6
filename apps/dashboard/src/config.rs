use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub accept_invalid_certs: bool,
    pub log_filter: String,
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "https://localhost:7043".into(),
            accept_invalid_certs: false,
            log_filter: "warn".into(),
            color: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_url: Option<String>,
    accept_invalid_certs: Option<bool>,
    log_filter: Option<String>,
    color: Option<bool>,
}

/// Overrides taken from the command line; applied last.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub accept_invalid_certs: bool,
    pub log_filter: Option<String>,
    pub no_color: bool,
}

pub fn load_settings(cli: &CliOverrides) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match &cli.config_path {
        Some(path) => apply_file(&mut settings, path)?,
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.exists() {
                apply_file(&mut settings, path)?;
            }
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());

    if let Some(v) = &cli.api_url {
        settings.api_base_url = v.clone();
    }
    if cli.accept_invalid_certs {
        settings.accept_invalid_certs = true;
    }
    if let Some(v) = &cli.log_filter {
        settings.log_filter = v.clone();
    }
    if cli.no_color {
        settings.color = false;
    }

    settings.api_base_url = normalize_api_url(&settings.api_base_url)?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, path: &Path) -> anyhow::Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    let file_cfg: FileSettings = toml::from_str(&raw)
        .with_context(|| format!("invalid config file '{}'", path.display()))?;

    if let Some(v) = file_cfg.api_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.accept_invalid_certs {
        settings.accept_invalid_certs = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    if let Some(v) = file_cfg.color {
        settings.color = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("ORDER_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = var("APP__API_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = var("APP__ACCEPT_INVALID_CERTS") {
        if let Some(parsed) = parse_flag(&v) {
            settings.accept_invalid_certs = parsed;
        }
    }

    if let Some(v) = var("RUST_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if var("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        settings.color = false;
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Reduces user input to `scheme://host[:port][/prefix]` without the
/// `/api/orders` suffix, which the gateway appends itself.
pub fn normalize_api_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(Settings::default().api_base_url);
    }
    let trimmed = trimmed
        .strip_suffix("/api/orders")
        .unwrap_or(trimmed)
        .trim_end_matches('/');

    let parsed = Url::parse(trimmed).with_context(|| format!("invalid API url '{raw}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("API url '{raw}' must use http or https");
    }
    if parsed.host_str().is_none() {
        bail!("API url '{raw}' has no host");
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
