use std::{fs, path::Path};

use anyhow::Context;
use picker_core::{Locale, PickerConfig, StrategyKind};
use serde::Deserialize;
use url::Url;

const DEFAULT_CONFIG_PATH: &str = "picker.toml";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: Option<String>,
    pub maps_base_url: Option<String>,
    pub log_filter: String,
    pub picker: PickerConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            maps_base_url: None,
            log_filter: "info".into(),
            picker: PickerConfig::default(),
        }
    }
}

impl Settings {
    /// Blank keys count as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn maps_base_url(&self) -> anyhow::Result<Option<Url>> {
        self.maps_base_url
            .as_deref()
            .map(|raw| Url::parse(raw).with_context(|| format!("invalid maps_base_url '{raw}'")))
            .transpose()
    }
}

/// Defaults, then `picker.toml` (or `path`), then environment overrides.
///
/// A missing default file is fine; a missing explicit `path` is an error.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config '{}'", path.display()))?;
            parse_settings(&raw)
                .with_context(|| format!("invalid config '{}'", path.display()))?
        }
        None => match fs::read_to_string(DEFAULT_CONFIG_PATH) {
            Ok(raw) => parse_settings(&raw)
                .with_context(|| format!("invalid config '{DEFAULT_CONFIG_PATH}'"))?,
            Err(_) => Settings::default(),
        },
    };

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    Ok(settings)
}

fn parse_settings(raw: &str) -> anyhow::Result<Settings> {
    let settings: Settings = toml::from_str(raw)?;
    settings.picker.validate()?;
    Ok(settings)
}

fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("GOOGLE_MAPS_API_KEY") {
        settings.api_key = Some(v);
    }
    if let Some(v) = var("PICKER__API_KEY") {
        settings.api_key = Some(v);
    }

    if let Some(v) = var("PICKER__MAPS_BASE_URL") {
        settings.maps_base_url = Some(v);
    }

    if let Some(v) = var("PICKER__LOG") {
        settings.log_filter = v;
    }

    if let Some(v) = var("PICKER__COUNTRY") {
        settings.picker.country = Some(v).filter(|country| !country.trim().is_empty());
    }

    if let Some(strategy) = var("PICKER__STRATEGY").as_deref().and_then(parse_strategy) {
        settings.picker.strategy = strategy;
    }

    if let Some(locale) = var("PICKER__LOCALE").as_deref().and_then(parse_locale) {
        settings.picker.locale = locale;
    }

    if let Some(v) = var("PICKER__DEBOUNCE_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.picker.debounce_ms = parsed;
        }
    }

    if let Some(v) = var("PICKER__ECHO_GUARD_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.picker.echo_guard_ms = parsed;
        }
    }
}

fn parse_strategy(raw: &str) -> Option<StrategyKind> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "interactive" => Some(StrategyKind::Interactive),
        "simple" => Some(StrategyKind::Simple),
        _ => None,
    }
}

fn parse_locale(raw: &str) -> Option<Locale> {
    match raw.trim().to_ascii_lowercase().replace('_', "-").as_str() {
        "en" => Some(Locale::En),
        "pt" | "pt-br" => Some(Locale::PtBr),
        _ => None,
    }
}
