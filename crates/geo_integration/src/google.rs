//! HTTP client for the Google Maps web services (Geocoding, Places, Geolocation).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use shared::{
    domain::{Coordinates, GeocodeResult, PlaceCandidate, PlaceSuggestion},
    error::LoadFailureCategory,
};
use tracing::{debug, warn};
use url::Url;

use crate::{AutocompleteOptions, LocationService, LocationServiceError, ServiceResult};

const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com";
const DEFAULT_GEOLOCATION_BASE_URL: &str = "https://www.googleapis.com";
const GEOCODE_PATH: &str = "/maps/api/geocode/json";
const AUTOCOMPLETE_PATH: &str = "/maps/api/place/autocomplete/json";
const DETAILS_PATH: &str = "/maps/api/place/details/json";
const GEOLOCATE_PATH: &str = "/geolocation/v1/geolocate";

#[derive(Debug, Clone)]
pub struct GoogleMapsConfig {
    pub api_key: String,
    pub maps_base_url: Url,
    pub geolocation_base_url: Url,
    pub language: Option<String>,
}

impl GoogleMapsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            maps_base_url: Url::parse(DEFAULT_MAPS_BASE_URL).expect("static maps url"),
            geolocation_base_url: Url::parse(DEFAULT_GEOLOCATION_BASE_URL)
                .expect("static geolocation url"),
            language: None,
        }
    }

    /// Points every endpoint at one origin; used against local mock servers.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.maps_base_url = base_url.clone();
        self.geolocation_base_url = base_url;
        self
    }
}

pub struct GoogleMapsService {
    http: Client,
    config: GoogleMapsConfig,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct GeocodeEntry {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeEntry>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    place_id: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct PlaceDetails {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    result: Option<PlaceDetails>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeolocateRequest {
    consider_ip: bool,
}

#[derive(Debug, Deserialize)]
struct GeolocateResponse {
    location: LatLng,
}

fn transport(err: reqwest::Error) -> LocationServiceError {
    LocationServiceError::Transport(err.to_string())
}

fn to_coordinates(location: &LatLng) -> ServiceResult<Coordinates> {
    Coordinates::new(location.lat, location.lng)
        .map_err(|err| LocationServiceError::Transport(format!("invalid location in response: {err}")))
}

/// Maps a Places/Geocoding `status` to `Ok(true)` (results), `Ok(false)` (no results) or an error.
fn check_status(status: &str, error_message: Option<&str>) -> ServiceResult<bool> {
    let detail = error_message.unwrap_or_default();
    match status {
        "OK" => Ok(true),
        "ZERO_RESULTS" | "NOT_FOUND" => Ok(false),
        "REQUEST_DENIED" => Err(LocationServiceError::Load {
            category: LoadFailureCategory::InvalidKey,
            message: format!("REQUEST_DENIED: {detail}"),
        }),
        other => Err(LocationServiceError::Transport(format!("{other}: {detail}"))),
    }
}

impl GoogleMapsService {
    pub fn new(config: GoogleMapsConfig) -> ServiceResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(LocationServiceError::MissingCredentials);
        }
        Ok(Self {
            http: Client::new(),
            config,
        })
    }

    fn endpoint(&self, base: &Url, path: &str, params: &[(&str, &str)]) -> ServiceResult<Url> {
        let mut url = base
            .join(path)
            .map_err(|err| LocationServiceError::Transport(format!("invalid endpoint {path}: {err}")))?;
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in params {
                query.append_pair(name, value);
            }
            if let Some(language) = &self.config.language {
                query.append_pair("language", language);
            }
            query.append_pair("key", &self.config.api_key);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ServiceResult<T> {
        let res = self.http.get(url).send().await.map_err(transport)?;
        if matches!(res.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(LocationServiceError::Load {
                category: LoadFailureCategory::InvalidKey,
                message: format!("http status {}", res.status()),
            });
        }
        res.error_for_status()
            .map_err(transport)?
            .json::<T>()
            .await
            .map_err(transport)
    }

    fn geocode_result(body: GeocodeResponse) -> ServiceResult<GeocodeResult> {
        if !check_status(&body.status, body.error_message.as_deref())? {
            return Ok(GeocodeResult::NotFound);
        }
        let Some(first) = body.results.into_iter().next() else {
            return Ok(GeocodeResult::NotFound);
        };
        Ok(GeocodeResult::Found {
            coordinates: to_coordinates(&first.geometry.location)?,
            formatted_address: first.formatted_address,
        })
    }
}

#[async_trait]
impl LocationService for GoogleMapsService {
    async fn load(&self) -> ServiceResult<()> {
        match self.reverse_geocode(Coordinates::UNSET).await {
            Ok(_) => Ok(()),
            Err(err @ LocationServiceError::Load { .. }) => Err(err),
            Err(err) => {
                warn!("maps: load check failed: {err}");
                Err(LocationServiceError::load(err.to_string()))
            }
        }
    }

    async fn autocomplete(
        &self,
        input: &str,
        options: &AutocompleteOptions,
    ) -> ServiceResult<Vec<PlaceSuggestion>> {
        let components = options
            .country
            .as_ref()
            .map(|country| format!("country:{}", country.to_ascii_lowercase()));
        let mut params = vec![("input", input)];
        if let Some(components) = components.as_deref() {
            params.push(("components", components));
        }
        let url = self.endpoint(&self.config.maps_base_url, AUTOCOMPLETE_PATH, &params)?;
        let body: AutocompleteResponse = self.get_json(url).await?;
        if !check_status(&body.status, body.error_message.as_deref())? {
            return Ok(Vec::new());
        }
        debug!(count = body.predictions.len(), "maps: autocomplete predictions");
        Ok(body
            .predictions
            .into_iter()
            .map(|prediction| PlaceSuggestion {
                place_id: prediction.place_id,
                description: prediction.description,
            })
            .collect())
    }

    async fn place_details(
        &self,
        place_id: &str,
        options: &AutocompleteOptions,
    ) -> ServiceResult<PlaceCandidate> {
        let fields = options.fields.join(",");
        let mut params = vec![("place_id", place_id)];
        if !fields.is_empty() {
            params.push(("fields", fields.as_str()));
        }
        let url = self.endpoint(&self.config.maps_base_url, DETAILS_PATH, &params)?;
        let body: DetailsResponse = self.get_json(url).await?;
        let found = check_status(&body.status, body.error_message.as_deref())?;
        let Some(details) = body.result.filter(|_| found) else {
            return Err(LocationServiceError::NotFound(format!("place {place_id}")));
        };
        let coordinates = match &details.geometry {
            Some(geometry) => Some(to_coordinates(&geometry.location)?),
            None => None,
        };
        Ok(PlaceCandidate {
            name: details.name,
            formatted_address: details.formatted_address,
            coordinates,
            place_types: details.types.into_iter().collect(),
        })
    }

    async fn forward_geocode(
        &self,
        address: &str,
        region: Option<&str>,
    ) -> ServiceResult<GeocodeResult> {
        let mut params = vec![("address", address)];
        if let Some(region) = region {
            params.push(("region", region));
        }
        let url = self.endpoint(&self.config.maps_base_url, GEOCODE_PATH, &params)?;
        Self::geocode_result(self.get_json(url).await?)
    }

    async fn reverse_geocode(&self, coordinates: Coordinates) -> ServiceResult<GeocodeResult> {
        let latlng = format!("{},{}", coordinates.lat, coordinates.lng);
        let url = self.endpoint(
            &self.config.maps_base_url,
            GEOCODE_PATH,
            &[("latlng", latlng.as_str())],
        )?;
        Self::geocode_result(self.get_json(url).await?)
    }

    async fn locate_device(&self, timeout: Duration) -> ServiceResult<Coordinates> {
        let url = self.endpoint(&self.config.geolocation_base_url, GEOLOCATE_PATH, &[])?;
        let res = self
            .http
            .post(url)
            .timeout(timeout)
            .json(&GeolocateRequest { consider_ip: true })
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    LocationServiceError::Timeout
                } else {
                    transport(err)
                }
            })?;
        match res.status() {
            StatusCode::NOT_FOUND => {
                return Err(LocationServiceError::PositionUnavailable(
                    "no position could be estimated".into(),
                ))
            }
            StatusCode::BAD_REQUEST | StatusCode::FORBIDDEN => {
                return Err(LocationServiceError::Load {
                    category: LoadFailureCategory::InvalidKey,
                    message: format!("geolocation rejected with status {}", res.status()),
                })
            }
            _ => {}
        }
        let body: GeolocateResponse = res
            .error_for_status()
            .map_err(transport)?
            .json()
            .await
            .map_err(transport)?;
        to_coordinates(&body.location)
    }
}

#[cfg(test)]
#[path = "tests/google_tests.rs"]
mod tests;
