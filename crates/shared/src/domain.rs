use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("coordinates must be finite numbers")]
    NotFinite,
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl Coordinates {
    /// `(0, 0)` never names a real pick; it marks "no location yet".
    pub const UNSET: Self = Self { lat: 0.0, lng: 0.0 };

    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(CoordinateError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoordinateError::LongitudeOutOfRange(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Re-checks a value that bypassed `new`, e.g. built as a literal or deserialized.
    pub fn validated(self) -> Result<Self, CoordinateError> {
        Self::new(self.lat, self.lng)
    }

    pub fn is_unset(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }

    /// Maps the sentinel to `None`.
    pub fn known(self) -> Option<Self> {
        (!self.is_unset()).then_some(self)
    }

    /// Text shown in place of an address when reverse geocoding fails.
    pub fn fallback_label(&self) -> String {
        format!("Lat: {:.6}, Lng: {:.6}", self.lat, self.lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// Place classification used to pick a map zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceType {
    Country,
    Locality,
    Establishment,
    Unclassified,
}

impl PlaceType {
    /// Most specific class present wins.
    pub fn classify<'a, I>(types: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best = PlaceType::Unclassified;
        for raw in types {
            let class = match raw {
                "establishment" | "point_of_interest" => PlaceType::Establishment,
                "locality" => PlaceType::Locality,
                other if other.starts_with("administrative_area") => PlaceType::Locality,
                "country" => PlaceType::Country,
                _ => PlaceType::Unclassified,
            };
            if class.specificity() > best.specificity() {
                best = class;
            }
        }
        best
    }

    pub fn zoom(self) -> u8 {
        match self {
            PlaceType::Country => 6,
            PlaceType::Locality => 12,
            PlaceType::Establishment => 17,
            PlaceType::Unclassified => 16,
        }
    }

    fn specificity(self) -> u8 {
        match self {
            PlaceType::Unclassified => 0,
            PlaceType::Country => 1,
            PlaceType::Locality => 2,
            PlaceType::Establishment => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub place_id: String,
    pub description: String,
}

/// Place details as returned by the autocomplete backend. Geometry may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub place_types: BTreeSet<String>,
}

impl PlaceCandidate {
    /// Returns `None` when the candidate has no usable geometry.
    pub fn into_selection(self) -> Option<PlaceSelection> {
        let coordinates = self.coordinates?.validated().ok()?.known()?;
        let formatted_address = self
            .formatted_address
            .filter(|address| !address.trim().is_empty())
            .or(self.name)
            .unwrap_or_else(|| coordinates.fallback_label());
        Some(PlaceSelection {
            formatted_address,
            coordinates,
            place_types: self.place_types,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSelection {
    pub formatted_address: String,
    pub coordinates: Coordinates,
    pub place_types: BTreeSet<String>,
}

impl PlaceSelection {
    pub fn place_type(&self) -> PlaceType {
        PlaceType::classify(self.place_types.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GeocodeResult {
    Found {
        formatted_address: String,
        coordinates: Coordinates,
    },
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportFrame {
    pub center: Coordinates,
    pub zoom: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<Coordinates>,
    pub marker_draggable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(raw: &[&str]) -> BTreeSet<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn zoom_follows_place_classification() {
        assert_eq!(PlaceType::classify(["country", "political"]).zoom(), 6);
        assert_eq!(PlaceType::classify(["locality", "political"]).zoom(), 12);
        assert_eq!(
            PlaceType::classify(["administrative_area_level_1"]).zoom(),
            12
        );
        assert_eq!(PlaceType::classify(["establishment"]).zoom(), 17);
        assert_eq!(PlaceType::classify(["point_of_interest"]).zoom(), 17);
        assert_eq!(PlaceType::classify(std::iter::empty()).zoom(), 16);
        assert_eq!(PlaceType::classify(["route"]).zoom(), 16);
    }

    #[test]
    fn most_specific_class_wins() {
        assert_eq!(
            PlaceType::classify(["country", "establishment"]),
            PlaceType::Establishment
        );
        assert_eq!(
            PlaceType::classify(["country", "locality"]),
            PlaceType::Locality
        );
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert_eq!(
            Coordinates::new(91.0, 0.0),
            Err(CoordinateError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            Coordinates::new(0.0, -180.5),
            Err(CoordinateError::LongitudeOutOfRange(-180.5))
        );
        assert_eq!(
            Coordinates::new(f64::NAN, 0.0),
            Err(CoordinateError::NotFinite)
        );
        assert!(Coordinates::new(-22.9, -43.2).is_ok());
    }

    #[test]
    fn origin_is_the_unset_sentinel() {
        assert!(Coordinates::UNSET.is_unset());
        assert_eq!(Coordinates::UNSET.known(), None);
        let rio = Coordinates::new(-22.9, -43.2).expect("valid");
        assert_eq!(rio.known(), Some(rio));
    }

    #[test]
    fn fallback_label_uses_six_decimals() {
        let rio = Coordinates::new(-22.9, -43.2).expect("valid");
        assert_eq!(rio.fallback_label(), "Lat: -22.900000, Lng: -43.200000");
    }

    #[test]
    fn candidate_without_geometry_is_not_selectable() {
        let candidate = PlaceCandidate {
            formatted_address: Some("Somewhere".into()),
            ..Default::default()
        };
        assert_eq!(candidate.into_selection(), None);
    }

    #[test]
    fn candidate_with_invalid_geometry_is_not_selectable() {
        let candidate = PlaceCandidate {
            formatted_address: Some("Nowhere".into()),
            coordinates: Some(Coordinates {
                lat: f64::NAN,
                lng: 10.0,
            }),
            ..Default::default()
        };
        assert!(candidate.into_selection().is_none());

        let candidate = PlaceCandidate {
            formatted_address: Some("Nowhere".into()),
            coordinates: Some(Coordinates {
                lat: 95.0,
                lng: 200.0,
            }),
            ..Default::default()
        };
        assert!(candidate.into_selection().is_none());
    }

    #[test]
    fn candidate_falls_back_to_name_when_address_missing() {
        let candidate = PlaceCandidate {
            name: Some("Cristo Redentor".into()),
            formatted_address: Some("  ".into()),
            coordinates: Some(Coordinates {
                lat: -22.9519,
                lng: -43.2105,
            }),
            place_types: types(&["establishment", "tourist_attraction"]),
        };
        let selection = candidate.into_selection().expect("selection");
        assert_eq!(selection.formatted_address, "Cristo Redentor");
        assert_eq!(selection.place_type(), PlaceType::Establishment);
    }
}
