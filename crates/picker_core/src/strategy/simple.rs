use geo_integration::LocationService;
use shared::domain::{Coordinates, GeocodeResult};
use tracing::warn;

use crate::messages::WarningKey;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Resolved {
        address: String,
        coordinates: Coordinates,
    },
    /// Typed text stays as the committed value with unset coordinates.
    Unresolved { warning: Option<WarningKey> },
}

pub async fn search(service: &dyn LocationService, text: &str, region: Option<&str>) -> SearchOutcome {
    let query = text.trim();
    if query.is_empty() {
        return SearchOutcome::Unresolved { warning: None };
    }

    match service.forward_geocode(query, region).await {
        Ok(GeocodeResult::Found {
            formatted_address,
            coordinates,
        }) if !coordinates.is_unset() && coordinates.validated().is_ok() => SearchOutcome::Resolved {
            address: formatted_address,
            coordinates,
        },
        Ok(_) => SearchOutcome::Unresolved {
            warning: Some(WarningKey::SearchNotFound),
        },
        Err(err) if err.is_unavailable() => {
            warn!("search: location service unavailable: {err}");
            SearchOutcome::Unresolved {
                warning: Some(WarningKey::MapFeaturesUnavailable),
            }
        }
        Err(err) => {
            warn!("search: forward geocode failed: {err}");
            SearchOutcome::Unresolved {
                warning: Some(WarningKey::LookupFailed),
            }
        }
    }
}
