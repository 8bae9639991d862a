use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::map::lod::LodLevel;

/// Sentido de una variante de ruta (`SENTIDO` en la capa GIS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Ida,
    Regreso,
}

impl Direction {
    /// Normaliza el valor crudo de `SENTIDO`; cualquier otro valor es None.
    pub fn parse(value: &str) -> Option<Direction> {
        match value.trim().to_uppercase().as_str() {
            "IDA" => Some(Direction::Ida),
            "REGRESO" => Some(Direction::Regreso),
            _ => None,
        }
    }

    /// Sentido a partir del código de una parada (`I-004`, `R-009`). Decide
    /// el prefijo antes del guion; un código suelto `I` / `R` también vale.
    pub fn from_stop_code(code: &str) -> Option<Direction> {
        let prefix = code.trim().split('-').next()?.trim().to_uppercase();
        match prefix.as_str() {
            "I" => Some(Direction::Ida),
            "R" => Some(Direction::Regreso),
            _ => None,
        }
    }

    pub fn as_sentido(&self) -> &'static str {
        match self {
            Direction::Ida => "IDA",
            Direction::Regreso => "REGRESO",
        }
    }
}

/// Geometría de una ruta cercana en los cuatro niveles de simplificación
/// precalculados por el backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LodGeometry {
    #[serde(rename = "type", default = "default_line_type")]
    pub kind: String,
    #[serde(default)]
    pub low: Vec<[f64; 2]>,
    #[serde(default)]
    pub med: Vec<[f64; 2]>,
    #[serde(default)]
    pub high: Vec<[f64; 2]>,
    #[serde(default)]
    pub ultra: Vec<[f64; 2]>,
}

impl LodGeometry {
    pub fn coords_for(&self, level: LodLevel) -> &[[f64; 2]] {
        match level {
            LodLevel::Low => &self.low,
            LodLevel::Med => &self.med,
            LodLevel::High => &self.high,
            LodLevel::Ultra => &self.ultra,
        }
    }
}

fn default_line_type() -> String {
    "LineString".to_string()
}

fn default_feature_type() -> String {
    "Feature".to_string()
}

/// Ruta devuelta por el servicio de rutas cercanas, ordenada por distancia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RutaNearby {
    pub codigo: String,
    pub nombre: String,
    pub tipo: String,
    pub subtipo: String,
    pub sentido: String,
    pub departamento: String,
    #[serde(default)]
    pub kilometros: f64,
    #[serde(default)]
    pub distancia_m: f64,
    #[serde(default)]
    pub geometry: Option<LodGeometry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RutaMetadata {
    pub codigo: String,
    pub nombre: String,
    pub sentido: String,
    pub tipo: String,
    pub subtipo: String,
    pub departamento: String,
    #[serde(default)]
    pub kilometros: f64,
}

/// Propiedades de una variante de ruta con los nombres de campo de la capa
/// GIS original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RutaProperties {
    #[serde(rename = "Código_de")]
    pub codigo_de: String,
    #[serde(rename = "Nombre_de_")]
    pub nombre_de: String,
    #[serde(rename = "SENTIDO")]
    pub sentido: String,
    #[serde(rename = "TIPO")]
    pub tipo: String,
    #[serde(rename = "SUBTIPO")]
    pub subtipo: String,
    #[serde(rename = "DEPARTAMEN")]
    pub departamento: String,
    #[serde(rename = "Kilómetro", default)]
    pub kilometro: String,
    #[serde(rename = "CANTIDAD_D", default)]
    pub cantidad_d: i32,
    #[serde(rename = "Shape_Leng", default)]
    pub shape_leng: f64,
}

/// Polilínea cruda de una variante; su orientación intrínseca es arbitraria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RutaGeometry {
    LineString { coordinates: Vec<[f64; 2]> },
    MultiLineString { coordinates: Vec<Vec<[f64; 2]>> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RutaFeature {
    #[serde(rename = "type", default = "default_feature_type")]
    pub kind: String,
    pub properties: RutaProperties,
    pub geometry: RutaGeometry,
}

impl RutaFeature {
    pub fn direction(&self) -> Option<Direction> {
        Direction::parse(&self.properties.sentido)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RutaDetailResponse {
    pub codigo: String,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub routes: Vec<RutaFeature>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyResponse {
    pub location: LatLng,
    #[serde(default)]
    pub radius_km: f64,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub routes: Vec<RutaNearby>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RutaSearchResponse {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub results: Vec<RutaMetadata>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListFilters {
    #[serde(default)]
    pub departamento: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub subtipo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RutaListResponse {
    #[serde(default)]
    pub filters: ListFilters,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub results: Vec<RutaMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RutasMetadataResponse {
    #[serde(default)]
    pub departamentos: Vec<String>,
    #[serde(default)]
    pub tipos: Vec<String>,
    #[serde(default)]
    pub subtipos: Vec<String>,
}

/// Parada de bus; `codigo` indica el sentido que sirve (`I` / `R`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parada {
    #[serde(default)]
    pub fid: Option<i64>,
    pub nombre: String,
    pub codigo: String,
    #[serde(default)]
    pub departamento: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyParadasResponse {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub paradas: Vec<Parada>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParadasByRutaResponse {
    pub codigo: String,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub paradas: Vec<Parada>,
}

pub const DEFAULT_RUTA_COLOR: &str = "#6b7280";

lazy_static! {
    /// Color de línea por subtipo de ruta.
    pub static ref RUTA_COLORS: HashMap<&'static str, &'static str> = {
        let mut colors = HashMap::new();
        colors.insert("URBANO", "#3b82f6");
        colors.insert("INTERURBANO", "#22c55e");
        colors.insert("INTERDEPARTAMENTAL", "#f59e0b");
        colors
    };
}

pub fn color_for_subtipo(subtipo: &str) -> &'static str {
    RUTA_COLORS
        .get(subtipo.trim().to_uppercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_RUTA_COLOR)
}
