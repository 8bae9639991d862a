use geo::Coord;
use tracing::debug;

use super::_structs::TripLeg;
use crate::rutas::{Direction, RutaFeature, RutaGeometry};

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Penalización por usar una variante cuyo SENTIDO no coincide con el del
/// tramo. Desempata entre variantes con extremos parecidos sin descartar por
/// completo la geometría contraria (a veces es la única disponible).
const SENTIDO_PENALTY_M: f64 = 250.0;

/// Distancia haversine en metros entre dos coordenadas lng/lat.
pub fn haversine_m(a: Coord, b: Coord) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let d_lat = (b.y - a.y).to_radians();
    let d_lng = (b.x - a.x).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Sentido efectivo de un tramo: el declarado, o el deducido del código de
/// parada de abordaje o descenso.
pub fn resolve_leg_direction(leg: &TripLeg) -> Option<Direction> {
    if leg.direction.is_some() {
        return leg.direction;
    }
    leg.board_stop
        .as_ref()
        .and_then(|stop| stop.codigo.as_deref())
        .and_then(Direction::from_stop_code)
        .or_else(|| {
            leg.alight_stop
                .as_ref()
                .and_then(|stop| stop.codigo.as_deref())
                .and_then(Direction::from_stop_code)
        })
}

/// Aplana la geometría de una variante en una sola polilínea.
fn flatten(geometry: &RutaGeometry) -> Vec<Coord> {
    match geometry {
        RutaGeometry::LineString { coordinates } => coordinates
            .iter()
            .map(|c| Coord { x: c[0], y: c[1] })
            .collect(),
        RutaGeometry::MultiLineString { coordinates } => coordinates
            .iter()
            .flatten()
            .map(|c| Coord { x: c[0], y: c[1] })
            .collect(),
    }
}

/// Qué tan bien los extremos de la polilínea cubren el par abordaje/descenso,
/// sin asumir orientación intrínseca.
fn endpoint_score(coords: &[Coord], board: Coord, alight: Coord) -> Option<f64> {
    let first = *coords.first()?;
    let last = *coords.last()?;
    let forward = haversine_m(first, board) + haversine_m(last, alight);
    let backward = haversine_m(first, alight) + haversine_m(last, board);
    Some(forward.min(backward))
}

/// Elige la variante que mejor sirve el tramo. Ante empate gana la primera
/// variante listada, que es el orden en que el backend las devuelve.
pub fn select_variant<'a>(leg: &TripLeg, variants: &'a [RutaFeature]) -> Option<&'a RutaFeature> {
    let board = leg.board_stop.as_ref()?.coord();
    let alight = leg.alight_stop.as_ref()?.coord();
    let wanted = resolve_leg_direction(leg);

    let mut best: Option<(&RutaFeature, f64)> = None;
    for variant in variants {
        let coords = flatten(&variant.geometry);
        let Some(mut score) = endpoint_score(&coords, board, alight) else {
            continue;
        };
        if let (Some(want), Some(have)) = (wanted, variant.direction()) {
            if want != have {
                score += SENTIDO_PENALTY_M;
            }
        }
        match best {
            Some((_, best_score)) if best_score <= score => {}
            _ => best = Some((variant, score)),
        }
    }
    best.map(|(variant, _)| variant)
}

fn nearest_index(coords: &[Coord], point: Coord) -> usize {
    let mut best_index = 0;
    let mut best_distance = f64::INFINITY;
    for (index, coord) in coords.iter().enumerate() {
        let distance = haversine_m(*coord, point);
        if distance < best_distance {
            best_distance = distance;
            best_index = index;
        }
    }
    best_index
}

/// Orienta la polilínea para recorrerla de `from` hacia `to`. La inversión es
/// cosmética (flechas y animaciones); no altera qué variante se dibuja.
pub fn orient_towards(mut coords: Vec<Coord>, from: Coord, to: Coord) -> Vec<Coord> {
    if coords.len() < 2 {
        return coords;
    }
    let from_index = nearest_index(&coords, from);
    let to_index = nearest_index(&coords, to);
    if from_index >= to_index {
        coords.reverse();
    }
    coords
}

/// Geometría orientada para el tramo de bus: selecciona variante, aplana y
/// orienta de la parada de abordaje hacia la de descenso.
pub fn oriented_leg_geometry(leg: &TripLeg, variants: &[RutaFeature]) -> Option<Vec<Coord>> {
    let variant = select_variant(leg, variants)?;
    let board = leg.board_stop.as_ref()?.coord();
    let alight = leg.alight_stop.as_ref()?.coord();
    let coords = flatten(&variant.geometry);
    if coords.is_empty() {
        debug!(codigo = %variant.properties.codigo_de, "variant without geometry");
        return None;
    }
    Some(orient_towards(coords, board, alight))
}
