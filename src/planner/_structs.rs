use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::rutas::Direction;

/// Punto con nombre opcional elegido como origen o destino de un viaje.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            name: None,
        }
    }

    pub fn named(lat: f64, lng: f64, name: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            name: Some(name.into()),
        }
    }

    pub fn coord(&self) -> Coord {
        Coord {
            x: self.lng,
            y: self.lat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegMode {
    Walk,
    Bus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRef {
    pub nombre: String,
    #[serde(default)]
    pub codigo: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

impl StopRef {
    pub fn coord(&self) -> Coord {
        Coord {
            x: self.lng,
            y: self.lat,
        }
    }
}

/// Tramo de una opción de viaje. Todo tramo tiene extremos propios; los
/// campos de bus son None en tramos a pie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripLeg {
    #[serde(rename = "type")]
    pub mode: LegMode,
    pub from: Location,
    pub to: Location,
    #[serde(default)]
    pub distance_m: f64,
    #[serde(default)]
    pub duration_m: f64,
    #[serde(default)]
    pub route_code: Option<String>,
    #[serde(default)]
    pub route_name: Option<String>,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub board_stop: Option<StopRef>,
    #[serde(default)]
    pub alight_stop: Option<StopRef>,
}

impl TripLeg {
    #[cfg(test)]
    pub fn walk(distance_m: f64) -> Self {
        Self {
            mode: LegMode::Walk,
            from: Location::new(13.700, -89.200),
            to: Location::new(13.701, -89.201),
            distance_m,
            duration_m: distance_m / 80.0,
            route_code: None,
            route_name: None,
            direction: None,
            board_stop: None,
            alight_stop: None,
        }
    }

    #[cfg(test)]
    pub fn bus(route_code: &str) -> Self {
        Self {
            mode: LegMode::Bus,
            from: Location::new(13.701, -89.201),
            to: Location::new(13.720, -89.220),
            distance_m: 4000.0,
            duration_m: 18.0,
            route_code: Some(route_code.to_string()),
            route_name: Some(format!("Ruta {}", route_code)),
            direction: None,
            board_stop: None,
            alight_stop: None,
        }
    }
}

/// Confianza del plan. Un valor desconocido en el wire degrada a Low: mejor
/// subestimar la calidad de un itinerario que sobreestimarla.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    #[serde(other)]
    Low,
}

impl Default for Confidence {
    fn default() -> Self {
        Confidence::Low
    }
}

impl Confidence {
    pub fn badge_color(&self) -> &'static str {
        match self {
            Confidence::High => "#22c55e",
            Confidence::Medium => "#eab308",
            Confidence::Low => "#ef4444",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Confidence::High => "Alta",
            Confidence::Medium => "Media",
            Confidence::Low => "Baja",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripOption {
    pub legs: Vec<TripLeg>,
    #[serde(default)]
    pub total_transfers: Option<u32>,
    #[serde(default)]
    pub total_walking_m: f64,
    #[serde(default)]
    pub estimated_time_m: f64,
    #[serde(default)]
    pub confidence: Confidence,
}

impl TripOption {
    /// Pares (desde, hacia) de los tramos a pie, en orden, para pedir sus
    /// geometrías peatonales.
    pub fn walk_pairs(&self) -> Vec<(Location, Location)> {
        self.legs
            .iter()
            .filter(|leg| leg.mode == LegMode::Walk)
            .map(|leg| (leg.from.clone(), leg.to.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripPlanRequest {
    pub origin: Location,
    pub destination: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlanResponse {
    #[serde(default)]
    pub options: Vec<TripOption>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_confidence_degrades_to_low() {
        let parsed: Confidence = serde_json::from_str("\"experimental\"").unwrap();
        assert_eq!(parsed, Confidence::Low);
        let option: TripOption = serde_json::from_str(r#"{"legs": []}"#).unwrap();
        assert_eq!(option.confidence, Confidence::Low);
    }

    #[test]
    fn test_confidence_badges() {
        assert_eq!(Confidence::High.badge_color(), "#22c55e");
        assert_eq!(Confidence::Medium.badge_color(), "#eab308");
        assert_eq!(Confidence::Low.badge_color(), "#ef4444");
        assert_eq!(Confidence::High.label(), "Alta");
    }

    #[test]
    fn test_leg_decoding() {
        let raw = r#"{
            "type": "bus",
            "from": {"lat": 13.70, "lng": -89.20},
            "to": {"lat": 13.72, "lng": -89.22},
            "distance_m": 5200.0,
            "duration_m": 22.0,
            "route_code": "42",
            "direction": "IDA",
            "board_stop": {"nombre": "Parada A", "codigo": "I-001", "lat": 13.70, "lng": -89.20}
        }"#;
        let leg: TripLeg = serde_json::from_str(raw).unwrap();
        assert_eq!(leg.mode, LegMode::Bus);
        assert_eq!(leg.direction, Some(Direction::Ida));
        assert_eq!(leg.from.lat, 13.70);
        assert_eq!(leg.to.lng, -89.22);
        assert!(leg.alight_stop.is_none());
    }

    #[test]
    fn test_walk_pairs() {
        let option = TripOption {
            legs: vec![TripLeg::walk(300.0), TripLeg::bus("42"), TripLeg::walk(150.0)],
            total_transfers: None,
            total_walking_m: 450.0,
            estimated_time_m: 30.0,
            confidence: Confidence::High,
        };
        let pairs = option.walk_pairs();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, option.legs[0].from);
        assert_eq!(pairs[0].1, option.legs[0].to);
    }

    #[test]
    fn test_location_coord_axes() {
        let location = Location::named(13.6929, -89.2182, "San Salvador");
        let coord = location.coord();
        assert_eq!(coord.x, -89.2182);
        assert_eq!(coord.y, 13.6929);
    }
}
