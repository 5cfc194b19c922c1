use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    Configuration,
    ServiceLoad,
    ResolutionMiss,
    PermissionDenied,
    Timeout,
    Unavailable,
}

/// Why the map backend failed to load; drives the user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadFailureCategory {
    Cors,
    InvalidKey,
    Generic,
}

impl LoadFailureCategory {
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_ascii_lowercase();
        if lower.contains("cors") || lower.contains("cross-origin") {
            LoadFailureCategory::Cors
        } else if lower.contains("request_denied")
            || lower.contains("api key")
            || lower.contains("invalidkey")
            || lower.contains("invalid key")
            || lower.contains("401")
            || lower.contains("403")
            || lower.contains("unauthorized")
            || lower.contains("forbidden")
        {
            LoadFailureCategory::InvalidKey
        } else {
            LoadFailureCategory::Generic
        }
    }
}

/// Non-blocking problem surfaced to the user. Never reaches the parent form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerWarning {
    pub code: WarningCode,
    pub message: String,
}

impl PickerWarning {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
