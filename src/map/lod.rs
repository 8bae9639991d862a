use serde::{Deserialize, Serialize};

use crate::rutas::{color_for_subtipo, RutaNearby};

/// Nivel de detalle de la geometría de una ruta. Los cuatro niveles vienen
/// precalculados por el backend; el cliente solo selecciona según el zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LodLevel {
    Low,
    Med,
    High,
    Ultra,
}

impl LodLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LodLevel::Low => "low",
            LodLevel::Med => "med",
            LodLevel::High => "high",
            LodLevel::Ultra => "ultra",
        }
    }
}

/// Nivel LOD para un zoom dado (semántica floor, intervalos semiabiertos).
pub fn lod_for_zoom(zoom: f64) -> LodLevel {
    let zoom = zoom.floor();
    if zoom < 11.0 {
        LodLevel::Low
    } else if zoom < 13.0 {
        LodLevel::Med
    } else if zoom < 15.0 {
        LodLevel::High
    } else {
        LodLevel::Ultra
    }
}

/// Tope de rutas renderizadas por nivel, configurable desde `Config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LodCaps {
    pub low: usize,
    pub med: usize,
    pub high: usize,
    pub ultra: usize,
}

impl Default for LodCaps {
    fn default() -> Self {
        Self {
            low: 50,
            med: 50,
            high: 50,
            ultra: 50,
        }
    }
}

impl LodCaps {
    pub fn cap(&self, level: LodLevel) -> usize {
        match level {
            LodLevel::Low => self.low,
            LodLevel::Med => self.med,
            LodLevel::High => self.high,
            LodLevel::Ultra => self.ultra,
        }
    }
}

/// Ruta lista para dibujar: geometría del nivel elegido y color por subtipo.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRoute<'a> {
    pub codigo: &'a str,
    pub color: &'static str,
    pub coords: &'a [[f64; 2]],
}

/// Selecciona las rutas a dibujar para el zoom actual.
///
/// Las rutas llegan ordenadas por distancia al origen de búsqueda (invariante
/// del servicio de rutas cercanas), así que basta tomar un prefijo. Las rutas
/// sin geometría se omiten en silencio: puede pasar con rutas recién cargadas
/// sin simplificaciones precalculadas.
pub fn visible_routes<'a>(
    routes: &'a [RutaNearby],
    zoom: f64,
    caps: &LodCaps,
) -> Vec<RenderRoute<'a>> {
    let level = lod_for_zoom(zoom);
    routes
        .iter()
        .filter_map(|ruta| {
            ruta.geometry.as_ref().map(|geometry| RenderRoute {
                codigo: &ruta.codigo,
                color: color_for_subtipo(&ruta.subtipo),
                coords: geometry.coords_for(level),
            })
        })
        .take(caps.cap(level))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rutas::LodGeometry;

    fn ruta(codigo: &str, with_geometry: bool) -> RutaNearby {
        RutaNearby {
            codigo: codigo.to_string(),
            nombre: format!("Ruta {}", codigo),
            tipo: "POR AUTOBUS".to_string(),
            subtipo: "URBANO".to_string(),
            sentido: "IDA".to_string(),
            departamento: "SAN SALVADOR".to_string(),
            kilometros: 12.5,
            distancia_m: 350.0,
            geometry: with_geometry.then(|| LodGeometry {
                kind: "LineString".to_string(),
                low: vec![[-89.2, 13.7]],
                med: vec![[-89.2, 13.7], [-89.21, 13.71]],
                high: vec![[-89.2, 13.7], [-89.205, 13.705], [-89.21, 13.71]],
                ultra: vec![
                    [-89.2, 13.7],
                    [-89.202, 13.702],
                    [-89.205, 13.705],
                    [-89.21, 13.71],
                ],
            }),
        }
    }

    #[test]
    fn test_lod_boundaries() {
        let cases = [
            (10.9, LodLevel::Low),
            (11.0, LodLevel::Med),
            (12.9, LodLevel::Med),
            (13.0, LodLevel::High),
            (14.9, LodLevel::High),
            (15.0, LodLevel::Ultra),
        ];
        for (zoom, expected) in cases {
            assert_eq!(lod_for_zoom(zoom), expected, "zoom {}", zoom);
        }
    }

    #[test]
    fn test_visible_routes_prefix_and_cap() {
        let routes = vec![ruta("1", true), ruta("2", true), ruta("3", true)];
        let caps = LodCaps {
            med: 2,
            ..LodCaps::default()
        };
        let visible = visible_routes(&routes, 12.0, &caps);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].codigo, "1");
        assert_eq!(visible[1].codigo, "2");
        // Nivel med para zoom 12.
        assert_eq!(visible[0].coords.len(), 2);
    }

    #[test]
    fn test_routes_without_geometry_are_skipped() {
        let routes = vec![ruta("1", false), ruta("2", true)];
        let visible = visible_routes(&routes, 15.8, &LodCaps::default());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].codigo, "2");
        // Nivel ultra para zoom >= 15.
        assert_eq!(visible[0].coords.len(), 4);
    }

    #[test]
    fn test_subtype_color() {
        let routes = [ruta("1", true)];
        let visible = visible_routes(&routes, 10.0, &LodCaps::default());
        assert_eq!(visible[0].color, "#3b82f6");
    }
}
