use log::warn;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::map::lod::LodCaps;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
const CONFIG_FILE: &str = "Config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no se pudo leer {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Config.toml inválido: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuración de la aplicación. Todo campo tiene default, así que un
/// `Config.toml` parcial o ausente es válido.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub feature_trip_planner: bool,
    pub feature_route_arrows: bool,
    pub search_debounce_ms: u64,
    pub lod: LodCaps,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            feature_trip_planner: true,
            feature_route_arrows: false,
            search_debounce_ms: 300,
            lod: LodCaps::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Carga `Config.toml` si existe y aplica los overrides de entorno. Un
    /// archivo ilegible o inválido no tumba el arranque: se avisa y se sigue
    /// con defaults.
    pub fn load() -> Self {
        let mut config = if Path::new(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE).unwrap_or_else(|err| {
                warn!("{}", err);
                Self::default()
            })
        } else {
            Self::default()
        };
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("API_URL") {
            if !url.trim().is_empty() {
                self.api_url = url;
            }
        }
        if let Some(enabled) = env_bool("FEATURE_TRIP_PLANNER") {
            self.feature_trip_planner = enabled;
        }
        if let Some(enabled) = env_bool("FEATURE_ROUTE_ARROWS") {
            self.feature_route_arrows = enabled;
        }
        if let Ok(raw) = std::env::var("SEARCH_DEBOUNCE_MS") {
            match raw.trim().parse() {
                Ok(ms) => self.search_debounce_ms = ms,
                Err(_) => warn!("SEARCH_DEBOUNCE_MS inválido: {}", raw),
            }
        }
    }
}

fn env_bool(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
}
