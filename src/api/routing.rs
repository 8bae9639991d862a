use std::collections::HashMap;

use futures::future::join_all;
use geo::Coord;
use log::warn;

use super::_structs::WalkRouteResponse;
use super::client::{ApiClient, ApiError};
use crate::planner::Location;

/// Escala de redondeo de la clave de caché: 5 decimales (~1 m) para que dos
/// taps casi idénticos compartan entrada.
const KEY_SCALE: f64 = 1e5;

type CacheKey = (i64, i64, i64, i64);

fn cache_key(from: Coord, to: Coord) -> CacheKey {
    (
        (from.x * KEY_SCALE).round() as i64,
        (from.y * KEY_SCALE).round() as i64,
        (to.x * KEY_SCALE).round() as i64,
        (to.y * KEY_SCALE).round() as i64,
    )
}

/// Caché en memoria de rutas peatonales. Sin tope: los pares origen/parada de
/// una sesión se cuentan en decenas.
#[derive(Debug, Default)]
pub struct WalkRouteCache {
    entries: HashMap<CacheKey, WalkRouteResponse>,
}

impl WalkRouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, from: Coord, to: Coord) -> Option<&WalkRouteResponse> {
        self.entries.get(&cache_key(from, to))
    }

    pub fn insert(&mut self, from: Coord, to: Coord, route: WalkRouteResponse) {
        self.entries.insert(cache_key(from, to), route);
    }
}

/// Ruta peatonal entre dos puntos.
pub async fn walk_route(
    api: &ApiClient,
    from: &Location,
    to: &Location,
) -> Result<WalkRouteResponse, ApiError> {
    let query = [
        ("from_lat", from.lat.to_string()),
        ("from_lng", from.lng.to_string()),
        ("to_lat", to.lat.to_string()),
        ("to_lng", to.lng.to_string()),
    ];
    api.get_json("/routing/foot", &query).await
}

/// Ruta peatonal pasando por la caché.
pub async fn walk_route_cached(
    api: &ApiClient,
    cache: &mut WalkRouteCache,
    from: &Location,
    to: &Location,
) -> Result<WalkRouteResponse, ApiError> {
    if let Some(cached) = cache.get(from.coord(), to.coord()) {
        return Ok(cached.clone());
    }
    let route = walk_route(api, from, to).await?;
    cache.insert(from.coord(), to.coord(), route.clone());
    Ok(route)
}

/// Resuelve en paralelo las geometrías peatonales de varios pares,
/// consultando la caché primero. Los pares que fallan quedan en None; un
/// tramo a pie sin geometría se dibuja como línea recta, no rompe el plan.
pub async fn fetch_walk_geometries(
    api: &ApiClient,
    cache: &mut WalkRouteCache,
    pairs: &[(Location, Location)],
) -> Vec<Option<WalkRouteResponse>> {
    let pending: Vec<usize> = pairs
        .iter()
        .enumerate()
        .filter(|(_, (from, to))| cache.get(from.coord(), to.coord()).is_none())
        .map(|(index, _)| index)
        .collect();

    let fetches = pending.iter().map(|&index| {
        let (from, to) = &pairs[index];
        walk_route(api, from, to)
    });
    for (&index, result) in pending.iter().zip(join_all(fetches).await) {
        match result {
            Ok(route) => {
                let (from, to) = &pairs[index];
                cache.insert(from.coord(), to.coord(), route);
            }
            Err(err) => warn!("walk route {} failed: {}", index, err),
        }
    }

    pairs
        .iter()
        .map(|(from, to)| cache.get(from.coord(), to.coord()).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(distance_m: f64) -> WalkRouteResponse {
        WalkRouteResponse {
            distance_m,
            duration_s: distance_m / 1.4,
            geometry: geojson::Geometry::new(geojson::Value::LineString(vec![
                vec![-89.20, 13.70],
                vec![-89.21, 13.71],
            ])),
        }
    }

    #[test]
    fn test_key_rounds_to_five_decimals() {
        let a = Coord { x: -89.218201, y: 13.692899 };
        let b = Coord { x: -89.218204, y: 13.692901 };
        let to = Coord { x: -89.20, y: 13.70 };
        assert_eq!(cache_key(a, to), cache_key(b, to));

        let far = Coord { x: -89.21840, y: 13.69290 };
        assert_ne!(cache_key(a, to), cache_key(far, to));
    }

    #[test]
    fn test_cache_hit_avoids_network() {
        let api = ApiClient::new("http://127.0.0.1:9");
        let mut cache = WalkRouteCache::new();
        let from = Location::new(13.6929, -89.2182);
        let to = Location::new(13.7058, -89.2152);
        cache.insert(from.coord(), to.coord(), route(420.0));

        // Con la entrada en caché no se toca la red, aunque el backend esté
        // caído.
        let cached = tokio_test::block_on(walk_route_cached(&api, &mut cache, &from, &to));
        assert_eq!(cached.unwrap().distance_m, 420.0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_option_walk_pairs_feed_the_fetch() {
        use crate::planner::{TripLeg, TripOption};

        let api = ApiClient::new("http://127.0.0.1:9");
        let mut cache = WalkRouteCache::new();
        let option = TripOption {
            legs: vec![TripLeg::walk(300.0), TripLeg::bus("42")],
            total_transfers: Some(0),
            total_walking_m: 300.0,
            estimated_time_m: 25.0,
            confidence: Default::default(),
        };
        let pairs = option.walk_pairs();
        assert_eq!(pairs.len(), 1);
        cache.insert(pairs[0].0.coord(), pairs[0].1.coord(), route(300.0));

        let results = tokio_test::block_on(fetch_walk_geometries(&api, &mut cache, &pairs));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].as_ref().unwrap().distance_m, 300.0);
    }

    #[test]
    fn test_fetch_mixes_cache_hits_and_failures() {
        let api = ApiClient::new("http://127.0.0.1:9");
        let mut cache = WalkRouteCache::new();
        let a = Location::new(13.6929, -89.2182);
        let b = Location::new(13.7058, -89.2152);
        let c = Location::new(13.7100, -89.2000);
        cache.insert(a.coord(), b.coord(), route(420.0));

        let pairs = vec![(a.clone(), b.clone()), (b, c)];
        let results = tokio_test::block_on(fetch_walk_geometries(&api, &mut cache, &pairs));
        assert_eq!(results.len(), 2);
        assert!(results[0].is_some());
        assert!(results[1].is_none());
    }
}
