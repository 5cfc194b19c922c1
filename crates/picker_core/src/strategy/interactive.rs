use std::time::Duration;

use geo_integration::{LocationService, LocationServiceError};
use shared::domain::{Coordinates, GeocodeResult, PlaceCandidate, PlaceSelection};
use tracing::{debug, warn};

use crate::messages::WarningKey;

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAddress {
    pub address: String,
    pub coordinates: Coordinates,
    /// False when `address` is the coordinate label fallback.
    pub resolved: bool,
}

/// Reverse geocodes a marker position. Never fails: a miss yields the
/// coordinate label while keeping the coordinates.
pub async fn resolve_address(
    service: &dyn LocationService,
    coordinates: Coordinates,
) -> ResolvedAddress {
    let fallback = || ResolvedAddress {
        address: coordinates.fallback_label(),
        coordinates,
        resolved: false,
    };

    match service.reverse_geocode(coordinates).await {
        Ok(GeocodeResult::Found {
            formatted_address, ..
        }) => ResolvedAddress {
            address: formatted_address,
            coordinates,
            resolved: true,
        },
        Ok(GeocodeResult::NotFound) => {
            debug!(lat = coordinates.lat, lng = coordinates.lng, "reverse geocode: no result");
            fallback()
        }
        Err(err) => {
            warn!(lat = coordinates.lat, lng = coordinates.lng, "reverse geocode failed: {err}");
            fallback()
        }
    }
}

pub fn selection_from_candidate(candidate: PlaceCandidate) -> Result<PlaceSelection, WarningKey> {
    candidate
        .into_selection()
        .ok_or(WarningKey::SelectionWithoutGeometry)
}

/// Asks the device for its position, bounded by `timeout` on our side as well.
pub async fn locate(
    service: &dyn LocationService,
    timeout: Duration,
) -> Result<Coordinates, WarningKey> {
    let located = tokio::time::timeout(timeout, service.locate_device(timeout))
        .await
        .map_err(|_| WarningKey::LocationTimeout)?;

    match located {
        Ok(coordinates) if !coordinates.is_unset() && coordinates.validated().is_ok() => {
            Ok(coordinates)
        }
        Ok(_) => Err(WarningKey::LocationUnavailable),
        Err(err) => {
            warn!("device location failed: {err}");
            Err(locate_warning(&err))
        }
    }
}

fn locate_warning(err: &LocationServiceError) -> WarningKey {
    match err {
        LocationServiceError::PermissionDenied => WarningKey::LocationPermissionDenied,
        LocationServiceError::Timeout => WarningKey::LocationTimeout,
        LocationServiceError::MissingCredentials | LocationServiceError::Load { .. } => {
            WarningKey::MapFeaturesUnavailable
        }
        LocationServiceError::NotFound(_)
        | LocationServiceError::PositionUnavailable(_)
        | LocationServiceError::Transport(_) => WarningKey::LocationUnavailable,
    }
}
