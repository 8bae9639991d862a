use super::client::{ApiClient, ApiError};
use crate::rutas::{
    ListFilters, NearbyParadasResponse, NearbyResponse, ParadasByRutaResponse, RutaDetailResponse,
    RutaListResponse, RutaSearchResponse, RutasMetadataResponse,
};

/// Rutas cercanas a un punto, ordenadas por distancia.
pub async fn nearby_routes(
    api: &ApiClient,
    lat: f64,
    lng: f64,
    radius_km: Option<f64>,
) -> Result<NearbyResponse, ApiError> {
    let mut query = vec![("lat", lat.to_string()), ("lng", lng.to_string())];
    if let Some(radius_km) = radius_km {
        query.push(("radius_km", radius_km.to_string()));
    }
    api.get_json("/rutas/nearby", &query).await
}

/// Detalle de una ruta con todas sus variantes por sentido.
pub async fn route_by_code(api: &ApiClient, codigo: &str) -> Result<RutaDetailResponse, ApiError> {
    api.get_json(&format!("/rutas/{}", codigo), &[]).await
}

/// Listado de rutas con filtros opcionales.
pub async fn list_routes(
    api: &ApiClient,
    filters: &ListFilters,
) -> Result<RutaListResponse, ApiError> {
    let mut query = Vec::new();
    if let Some(departamento) = &filters.departamento {
        query.push(("departamento", departamento.clone()));
    }
    if let Some(tipo) = &filters.tipo {
        query.push(("tipo", tipo.clone()));
    }
    if let Some(subtipo) = &filters.subtipo {
        query.push(("subtipo", subtipo.clone()));
    }
    api.get_json("/rutas", &query).await
}

/// Búsqueda de rutas por código o nombre en el backend.
pub async fn search_routes(api: &ApiClient, q: &str) -> Result<RutaSearchResponse, ApiError> {
    api.get_json("/rutas/search", &[("q", q.to_string())]).await
}

/// Valores distintos de departamento, tipo y subtipo para los filtros.
pub async fn routes_metadata(api: &ApiClient) -> Result<RutasMetadataResponse, ApiError> {
    api.get_json("/rutas/metadata", &[]).await
}

/// Paradas cercanas a un punto.
pub async fn nearby_paradas(
    api: &ApiClient,
    lat: f64,
    lng: f64,
    radius_km: Option<f64>,
) -> Result<NearbyParadasResponse, ApiError> {
    let mut query = vec![("lat", lat.to_string()), ("lng", lng.to_string())];
    if let Some(radius_km) = radius_km {
        query.push(("radius_km", radius_km.to_string()));
    }
    api.get_json("/paradas/nearby", &query).await
}

/// Paradas servidas por una ruta.
pub async fn paradas_by_ruta(
    api: &ApiClient,
    codigo: &str,
) -> Result<ParadasByRutaResponse, ApiError> {
    api.get_json(&format!("/rutas/{}/paradas", codigo), &[])
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_backend_is_a_network_error() {
        let api = ApiClient::new("http://127.0.0.1:9");
        let result = tokio_test::block_on(nearby_routes(&api, 13.6929, -89.2182, Some(0.5)));
        assert!(matches!(result, Err(ApiError::Http(_))));
    }
}
