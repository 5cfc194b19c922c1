use std::time::Duration;

use async_trait::async_trait;
use shared::{
    domain::{Coordinates, GeocodeResult, PlaceCandidate, PlaceSuggestion, ViewportFrame},
    error::LoadFailureCategory,
};
use thiserror::Error;

pub mod google;

pub use google::{GoogleMapsConfig, GoogleMapsService};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationServiceError {
    #[error("location service credentials are missing")]
    MissingCredentials,
    #[error("location service failed to load ({category:?}): {message}")]
    Load {
        category: LoadFailureCategory,
        message: String,
    },
    #[error("no result for {0}")]
    NotFound(String),
    #[error("device location permission denied")]
    PermissionDenied,
    #[error("device location request timed out")]
    Timeout,
    #[error("device location unavailable: {0}")]
    PositionUnavailable(String),
    #[error("location service request failed: {0}")]
    Transport(String),
}

impl LocationServiceError {
    pub fn load(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Load {
            category: LoadFailureCategory::from_message(&message),
            message,
        }
    }

    /// Errors that mean the backend itself is unusable, not just this request.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::MissingCredentials | Self::Load { .. })
    }
}

pub type ServiceResult<T> = Result<T, LocationServiceError>;

/// Restrictions applied to autocomplete and place-details lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutocompleteOptions {
    pub country: Option<String>,
    pub fields: Vec<String>,
    pub language: Option<String>,
}

#[async_trait]
pub trait LocationService: Send + Sync {
    /// Checks that the backend is reachable and the credentials are accepted.
    async fn load(&self) -> ServiceResult<()>;
    async fn autocomplete(
        &self,
        input: &str,
        options: &AutocompleteOptions,
    ) -> ServiceResult<Vec<PlaceSuggestion>>;
    async fn place_details(
        &self,
        place_id: &str,
        options: &AutocompleteOptions,
    ) -> ServiceResult<PlaceCandidate>;
    async fn forward_geocode(
        &self,
        address: &str,
        region: Option<&str>,
    ) -> ServiceResult<GeocodeResult>;
    async fn reverse_geocode(&self, coordinates: Coordinates) -> ServiceResult<GeocodeResult>;
    async fn locate_device(&self, timeout: Duration) -> ServiceResult<Coordinates>;
}

pub trait ViewportRenderer: Send + Sync {
    fn render(&self, frame: &ViewportFrame);
}

pub struct MissingLocationService;

#[async_trait]
impl LocationService for MissingLocationService {
    async fn load(&self) -> ServiceResult<()> {
        Err(LocationServiceError::MissingCredentials)
    }

    async fn autocomplete(
        &self,
        _input: &str,
        _options: &AutocompleteOptions,
    ) -> ServiceResult<Vec<PlaceSuggestion>> {
        Err(LocationServiceError::MissingCredentials)
    }

    async fn place_details(
        &self,
        _place_id: &str,
        _options: &AutocompleteOptions,
    ) -> ServiceResult<PlaceCandidate> {
        Err(LocationServiceError::MissingCredentials)
    }

    async fn forward_geocode(
        &self,
        _address: &str,
        _region: Option<&str>,
    ) -> ServiceResult<GeocodeResult> {
        Err(LocationServiceError::MissingCredentials)
    }

    async fn reverse_geocode(&self, _coordinates: Coordinates) -> ServiceResult<GeocodeResult> {
        Err(LocationServiceError::MissingCredentials)
    }

    async fn locate_device(&self, _timeout: Duration) -> ServiceResult<Coordinates> {
        Err(LocationServiceError::MissingCredentials)
    }
}

pub struct NullViewportRenderer;

impl ViewportRenderer for NullViewportRenderer {
    fn render(&self, _frame: &ViewportFrame) {}
}
