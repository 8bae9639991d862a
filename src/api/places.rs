use log::warn;

use super::_structs::{ReverseResponse, ReverseResult, SearchResponse};
use super::client::{ApiClient, ApiError};
use crate::geolocation::MI_UBICACION;
use crate::planner::Location;

const DEFAULT_SEARCH_LIMIT: u32 = 8;

/// Parámetros opcionales de la búsqueda de lugares. Con `near` el backend
/// prioriza resultados cercanos; `country` acota al código de país.
#[derive(Debug, Clone, Default)]
pub struct SearchPlacesParams {
    pub limit: Option<u32>,
    pub near: Option<(f64, f64)>,
    pub country: Option<String>,
}

fn search_query(query: &str, params: &SearchPlacesParams) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("q", query.to_string()),
        ("limit", params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT).to_string()),
    ];
    if let Some((lat, lng)) = params.near {
        pairs.push(("lat", lat.to_string()));
        pairs.push(("lng", lng.to_string()));
    }
    if let Some(country) = &params.country {
        pairs.push(("country", country.clone()));
    }
    pairs
}

/// Búsqueda de lugares por texto libre, con sesgo de cercanía opcional.
pub async fn search_places(
    api: &ApiClient,
    query: &str,
    params: &SearchPlacesParams,
) -> Result<SearchResponse, ApiError> {
    api.get_json("/places/search", &search_query(query, params))
        .await
}

/// Geocodificación inversa de un punto.
pub async fn reverse_geocode(
    api: &ApiClient,
    lat: f64,
    lng: f64,
) -> Result<ReverseResponse, ApiError> {
    let query = [("lat", lat.to_string()), ("lng", lng.to_string())];
    api.get_json("/places/reverse", &query).await
}

/// Nombre de un punto a partir del mejor resultado inverso. Sin nombre
/// utilizable cae al rótulo genérico de ubicación del usuario.
pub fn location_from_reverse(lat: f64, lng: f64, result: Option<ReverseResult>) -> Location {
    let name = result
        .and_then(|r| r.name.or(r.display_name))
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| MI_UBICACION.to_string());
    Location::named(lat, lng, name)
}

/// Resuelve el nombre de la posición del usuario. Un geocodificador caído no
/// bloquea el flujo: se sigue con el rótulo genérico.
pub async fn resolve_location(api: &ApiClient, lat: f64, lng: f64) -> Location {
    match reverse_geocode(api, lat, lng).await {
        Ok(response) => location_from_reverse(lat, lng, response.into_best()),
        Err(err) => {
            warn!("reverse geocode failed: {}", err);
            location_from_reverse(lat, lng, None)
        }
    }
}
