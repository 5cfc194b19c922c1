use std::time::Duration;

use geo_integration::AutocompleteOptions;
use serde::Deserialize;
use shared::domain::{CoordinateError, Coordinates};
use thiserror::Error;

pub use crate::messages::Locale;
pub use crate::strategy::StrategyKind;

/// São Paulo, used when neither the parent nor the user supplied a location.
pub const FALLBACK_CENTER: Coordinates = Coordinates {
    lat: -23.5505,
    lng: -46.6333,
};

/// Deepest zoom level the map widget accepts.
pub const MAX_ZOOM: u8 = 22;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid default_center: {0}")]
    DefaultCenter(#[from] CoordinateError),
    #[error("default_zoom {0} is outside 0..={MAX_ZOOM}")]
    DefaultZoom(u8),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub strategy: StrategyKind,
    pub country: Option<String>,
    pub result_fields: Vec<String>,
    pub default_zoom: u8,
    pub default_center: Coordinates,
    pub debounce_ms: u64,
    pub echo_guard_ms: u64,
    pub geolocation_timeout_ms: u64,
    pub locale: Locale,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Interactive,
            country: Some("br".into()),
            result_fields: vec![
                "formatted_address".into(),
                "geometry".into(),
                "name".into(),
                "types".into(),
            ],
            default_zoom: 13,
            default_center: FALLBACK_CENTER,
            debounce_ms: 300,
            echo_guard_ms: 300,
            geolocation_timeout_ms: 10_000,
            locale: Locale::En,
        }
    }
}

impl PickerConfig {
    /// Checks values serde cannot, such as the default center's range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.default_center.validated()?;
        if self.default_zoom > MAX_ZOOM {
            return Err(ConfigError::DefaultZoom(self.default_zoom));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn echo_window(&self) -> Duration {
        Duration::from_millis(self.echo_guard_ms)
    }

    pub fn geolocation_timeout(&self) -> Duration {
        Duration::from_millis(self.geolocation_timeout_ms)
    }

    pub fn region(&self) -> Option<&str> {
        self.country
            .as_deref()
            .map(str::trim)
            .filter(|country| !country.is_empty())
    }

    pub fn autocomplete_options(&self) -> AutocompleteOptions {
        AutocompleteOptions {
            country: self.region().map(str::to_string),
            fields: self.result_fields.clone(),
            language: None,
        }
    }
}
