//! Geocoding adapters. Both strategies sit behind the same parent contract;
//! they differ in which user gestures resolve locations.

use serde::{Deserialize, Serialize};

pub mod interactive;
pub mod simple;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Autocomplete, draggable marker, reverse geocoding and device location.
    #[default]
    Interactive,
    /// Manual forward-geocode search on button press or Enter.
    Simple,
}

impl StrategyKind {
    pub fn renders_viewport(self) -> bool {
        matches!(self, StrategyKind::Interactive)
    }

    pub fn supports_map_gestures(self) -> bool {
        matches!(self, StrategyKind::Interactive)
    }

    pub fn searches_explicitly(self) -> bool {
        matches!(self, StrategyKind::Simple)
    }
}
