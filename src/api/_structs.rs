use geo_types::{Coord, LineString};
use serde::{Deserialize, Serialize};

/// Resultado de búsqueda de lugares (geocodificador del backend).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub road: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// Respuesta de geocodificación inversa: el mismo sobre `results[]` que la
/// búsqueda; interesa el primer resultado.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReverseResponse {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub results: Vec<ReverseResult>,
}

impl ReverseResponse {
    pub fn into_best(self) -> Option<ReverseResult> {
        self.results.into_iter().next()
    }
}

/// Un resultado inverso; ambos nombres pueden faltar.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReverseResult {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Ruta peatonal calculada por el backend entre dos puntos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkRouteResponse {
    #[serde(default)]
    pub distance_m: f64,
    #[serde(default)]
    pub duration_s: f64,
    pub geometry: geojson::Geometry,
}

impl WalkRouteResponse {
    /// Polilínea peatonal, si la geometría trae un LineString dibujable.
    pub fn line(&self) -> Option<LineString<f64>> {
        match &self.geometry.value {
            geojson::Value::LineString(positions) => {
                let points: Vec<Coord> = positions
                    .iter()
                    .filter(|p| p.len() >= 2)
                    .map(|p| Coord { x: p[0], y: p[1] })
                    .collect();
                (points.len() >= 2).then(|| points.into())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_route_line() {
        let raw = r#"{
            "distance_m": 420.0,
            "duration_s": 300.0,
            "geometry": {
                "type": "LineString",
                "coordinates": [[-89.20, 13.70], [-89.21, 13.71]]
            }
        }"#;
        let route: WalkRouteResponse = serde_json::from_str(raw).unwrap();
        let line = route.line().unwrap();
        assert_eq!(line.0.len(), 2);
        assert_eq!(line.0[0], Coord { x: -89.20, y: 13.70 });
    }

    #[test]
    fn test_degenerate_geometry_yields_no_line() {
        let raw = r#"{
            "geometry": {"type": "LineString", "coordinates": [[-89.20, 13.70]]}
        }"#;
        let route: WalkRouteResponse = serde_json::from_str(raw).unwrap();
        assert!(route.line().is_none());

        let point = r#"{
            "geometry": {"type": "Point", "coordinates": [-89.20, 13.70]}
        }"#;
        let route: WalkRouteResponse = serde_json::from_str(point).unwrap();
        assert!(route.line().is_none());
    }

    #[test]
    fn test_reverse_envelope_decoding() {
        let raw = r#"{
            "count": 2,
            "results": [
                {"name": "Plaza Morazán", "display_name": "Plaza Morazán, San Salvador"},
                {"display_name": "Centro Histórico"}
            ]
        }"#;
        let response: ReverseResponse = serde_json::from_str(raw).unwrap();
        let best = response.into_best().unwrap();
        assert_eq!(best.name.as_deref(), Some("Plaza Morazán"));

        let empty: ReverseResponse = serde_json::from_str(r#"{"count": 0, "results": []}"#).unwrap();
        assert!(empty.into_best().is_none());
    }

    #[test]
    fn test_search_result_decoding() {
        let raw = r#"{
            "query": "metrocentro",
            "count": 1,
            "results": [{
                "type": "poi",
                "name": "Metrocentro",
                "lat": 13.7058,
                "lng": -89.2152,
                "address": {"city": "San Salvador"}
            }]
        }"#;
        let response: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.results[0].name, "Metrocentro");
        assert_eq!(
            response.results[0].address.as_ref().unwrap().city.as_deref(),
            Some("San Salvador")
        );
    }
}
