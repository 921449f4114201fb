use std::{fs, path::Path, time::Duration};

use anyhow::{anyhow, Context};
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "people.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend_api_url: String,
    pub debug_urls: bool,
    pub collapse_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_api_url: String::new(),
            debug_urls: false,
            collapse_delay_ms: 1200,
        }
    }
}

impl Settings {
    pub fn collapse_delay(&self) -> Duration {
        Duration::from_millis(self.collapse_delay_ms)
    }

    /// Reason the base address will not work, if any. Not fatal: requests are
    /// still attempted and fail with a transport error.
    pub fn backend_url_problem(&self) -> Option<String> {
        if self.backend_api_url.is_empty() {
            return Some("backend api url is not set".to_string());
        }
        url::Url::parse(&self.backend_api_url)
            .err()
            .map(|err| format!("backend api url '{}' is invalid: {err}", self.backend_api_url))
    }

    fn apply_file(&mut self, raw: &str) -> anyhow::Result<()> {
        let table = toml::from_str::<toml::Table>(raw).context("failed to parse settings file")?;

        if let Some(value) = table.get("backend_api_url") {
            self.backend_api_url = value
                .as_str()
                .ok_or_else(|| anyhow!("backend_api_url must be a string"))?
                .to_string();
        }
        if let Some(value) = table.get("debug_urls") {
            self.debug_urls = match value {
                toml::Value::Boolean(flag) => *flag,
                toml::Value::String(raw) => parse_flag(raw)
                    .ok_or_else(|| anyhow!("debug_urls must be a boolean, got '{raw}'"))?,
                other => return Err(anyhow!("debug_urls must be a boolean, got {other}")),
            };
        }
        if let Some(value) = table.get("collapse_delay_ms") {
            self.collapse_delay_ms = match value {
                toml::Value::Integer(ms) => u64::try_from(*ms)
                    .map_err(|_| anyhow!("collapse_delay_ms must not be negative"))?,
                toml::Value::String(raw) => raw
                    .parse()
                    .with_context(|| format!("collapse_delay_ms is not a number: '{raw}'"))?,
                other => return Err(anyhow!("collapse_delay_ms must be an integer, got {other}")),
            };
        }
        Ok(())
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("BACKEND_API_URL") {
            self.backend_api_url = v;
        }
        if let Some(v) = lookup("APP__BACKEND_API_URL") {
            self.backend_api_url = v;
        }

        if let Some(v) = lookup("APP__DEBUG_URLS") {
            match parse_flag(&v) {
                Some(flag) => self.debug_urls = flag,
                None => warn!(value = %v, "ignoring unparsable APP__DEBUG_URLS"),
            }
        }

        if let Some(v) = lookup("APP__COLLAPSE_DELAY_MS") {
            match v.parse::<u64>() {
                Ok(parsed) => self.collapse_delay_ms = parsed,
                Err(_) => warn!(value = %v, "ignoring unparsable APP__COLLAPSE_DELAY_MS"),
            }
        }
    }
}

/// Defaults, then the settings file, then the environment. An explicit
/// `config_path` must exist; the default file is optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
            settings
                .apply_file(&raw)
                .with_context(|| format!("invalid settings file '{}'", path.display()))?;
        }
        None => {
            if let Ok(raw) = fs::read_to_string(DEFAULT_CONFIG_FILE) {
                if let Err(err) = settings.apply_file(&raw) {
                    warn!(error = %err, file = DEFAULT_CONFIG_FILE, "ignoring settings file");
                }
            }
        }
    }

    settings.apply_env(|key| std::env::var(key).ok());
    Ok(settings)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
