//! User-visible warning texts.

use serde::{Deserialize, Serialize};
use shared::error::{LoadFailureCategory, PickerWarning, WarningCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-BR", alias = "pt_br", alias = "pt")]
    PtBr,
}

impl Locale {
    /// BCP 47 tag, also accepted by the Maps `language` parameter.
    pub fn language_tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::PtBr => "pt-BR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKey {
    MissingCredentials,
    ServiceLoad(LoadFailureCategory),
    MapFeaturesUnavailable,
    SelectionWithoutGeometry,
    SearchNotFound,
    ReverseGeocodeFailed,
    LookupFailed,
    LocationPermissionDenied,
    LocationTimeout,
    LocationUnavailable,
    InvalidPosition,
}

impl WarningKey {
    pub fn code(self) -> WarningCode {
        match self {
            WarningKey::MissingCredentials => WarningCode::Configuration,
            WarningKey::ServiceLoad(_) => WarningCode::ServiceLoad,
            WarningKey::MapFeaturesUnavailable => WarningCode::Unavailable,
            WarningKey::SelectionWithoutGeometry
            | WarningKey::SearchNotFound
            | WarningKey::ReverseGeocodeFailed
            | WarningKey::LookupFailed
            | WarningKey::InvalidPosition => WarningCode::ResolutionMiss,
            WarningKey::LocationPermissionDenied => WarningCode::PermissionDenied,
            WarningKey::LocationTimeout => WarningCode::Timeout,
            WarningKey::LocationUnavailable => WarningCode::Unavailable,
        }
    }

    pub fn text(self, locale: Locale) -> &'static str {
        use LoadFailureCategory::{Cors, Generic, InvalidKey};

        match (locale, self) {
            (Locale::En, WarningKey::MissingCredentials) => {
                "Maps API key is not configured; location search is disabled."
            }
            (Locale::PtBr, WarningKey::MissingCredentials) => {
                "Chave da API de mapas não configurada; a busca de localização está desativada."
            }
            (Locale::En, WarningKey::ServiceLoad(Cors)) => {
                "The maps service was blocked by CORS; check the allowed origins for this key."
            }
            (Locale::PtBr, WarningKey::ServiceLoad(Cors)) => {
                "O serviço de mapas foi bloqueado por CORS; verifique as origens permitidas da chave."
            }
            (Locale::En, WarningKey::ServiceLoad(InvalidKey)) => {
                "The maps API key was rejected; check the key and the enabled APIs."
            }
            (Locale::PtBr, WarningKey::ServiceLoad(InvalidKey)) => {
                "A chave da API de mapas foi recusada; verifique a chave e as APIs habilitadas."
            }
            (Locale::En, WarningKey::ServiceLoad(Generic)) => {
                "Could not load the maps service; type the address manually."
            }
            (Locale::PtBr, WarningKey::ServiceLoad(Generic)) => {
                "Não foi possível carregar o serviço de mapas; digite o endereço manualmente."
            }
            (Locale::En, WarningKey::MapFeaturesUnavailable) => {
                "Map features are unavailable; type the address instead."
            }
            (Locale::PtBr, WarningKey::MapFeaturesUnavailable) => {
                "Recursos do mapa indisponíveis; digite o endereço."
            }
            (Locale::En, WarningKey::SelectionWithoutGeometry) => {
                "The selected place has no location details. Pick another suggestion."
            }
            (Locale::PtBr, WarningKey::SelectionWithoutGeometry) => {
                "O local selecionado não possui detalhes de localização. Escolha outra sugestão."
            }
            (Locale::En, WarningKey::SearchNotFound) => "No location found for this address.",
            (Locale::PtBr, WarningKey::SearchNotFound) => {
                "Nenhuma localização encontrada para este endereço."
            }
            (Locale::En, WarningKey::ReverseGeocodeFailed) => {
                "Could not find an address for this point; showing coordinates instead."
            }
            (Locale::PtBr, WarningKey::ReverseGeocodeFailed) => {
                "Não foi possível obter o endereço deste ponto; exibindo as coordenadas."
            }
            (Locale::En, WarningKey::LookupFailed) => "Location lookup failed; please try again.",
            (Locale::PtBr, WarningKey::LookupFailed) => {
                "Falha ao buscar a localização; tente novamente."
            }
            (Locale::En, WarningKey::LocationPermissionDenied) => {
                "Permission to access your location was denied."
            }
            (Locale::PtBr, WarningKey::LocationPermissionDenied) => {
                "A permissão para acessar sua localização foi negada."
            }
            (Locale::En, WarningKey::LocationTimeout) => "Timed out while getting your location.",
            (Locale::PtBr, WarningKey::LocationTimeout) => {
                "Tempo esgotado ao obter sua localização."
            }
            (Locale::En, WarningKey::LocationUnavailable) => "Your location is unavailable.",
            (Locale::PtBr, WarningKey::LocationUnavailable) => {
                "Sua localização está indisponível."
            }
            (Locale::En, WarningKey::InvalidPosition) => {
                "That position is outside the valid latitude/longitude range; the marker was not moved."
            }
            (Locale::PtBr, WarningKey::InvalidPosition) => {
                "Essa posição está fora do intervalo válido de latitude/longitude; o marcador não foi movido."
            }
        }
    }

    pub fn to_warning(self, locale: Locale) -> PickerWarning {
        PickerWarning::new(self.code(), self.text(locale))
    }
}
