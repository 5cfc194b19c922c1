use serde::{Deserialize, Serialize};

use crate::domain::Coordinates;

/// Inbound values owned by the parent form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PickerProps {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Last revision the parent received from the picker, if it tracks them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PickerProps {
    pub fn new(value: impl Into<String>, coordinates: Option<Coordinates>) -> Self {
        Self {
            value: value.into(),
            coordinates,
            ..Default::default()
        }
    }

    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = Some(revision);
        self
    }
}

/// Outbound call made to the parent form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ParentNotification {
    LocationChanged {
        address: String,
        coordinates: Coordinates,
        revision: u64,
    },
    CoordinatesChanged {
        coordinates: Coordinates,
        revision: u64,
    },
}

impl ParentNotification {
    pub fn revision(&self) -> u64 {
        match self {
            ParentNotification::LocationChanged { revision, .. }
            | ParentNotification::CoordinatesChanged { revision, .. } => *revision,
        }
    }
}
