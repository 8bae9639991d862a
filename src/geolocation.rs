use crate::planner::Location;

/// Nombre por defecto para ubicaciones obtenidas del dispositivo o sin
/// resultado de geocodificación inversa.
pub const MI_UBICACION: &str = "Mi ubicación";

/// Errores de geolocalización del dispositivo, mapeados a los tres mensajes
/// fijos que ve el usuario. Los códigos siguen la numeración de la plataforma
/// (1 = permiso denegado, 2 = posición no disponible, 3 = timeout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Permiso de ubicación denegado. Verifica la configuración de tu navegador.")]
    PermissionDenied,
    #[error("Ubicación no disponible. Verifica tu conexión GPS.")]
    PositionUnavailable,
    #[error("Tiempo de espera agotado. Intenta de nuevo.")]
    Timeout,
}

impl GeolocationError {
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(Self::PermissionDenied),
            2 => Some(Self::PositionUnavailable),
            3 => Some(Self::Timeout),
            _ => None,
        }
    }
}

/// Construye la ubicación del usuario a partir de coordenadas crudas.
pub fn current_location(lat: f64, lng: f64) -> Location {
    Location::named(lat, lng, MI_UBICACION)
}
