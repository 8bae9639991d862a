use tracing::debug;

use super::_structs::{Direction, RutaDetailResponse, RutaFeature};

/// Ruta seleccionada en el mapa, con sus variantes por sentido y el sentido
/// activo para dibujar.
#[derive(Debug, Clone)]
pub struct RouteSelection {
    pub codigo: String,
    pub variants: Vec<RutaFeature>,
    pub direction: Direction,
}

impl RouteSelection {
    /// Construye la selección a partir del detalle del backend. Arranca en
    /// IDA cuando esa variante existe, si no en el sentido de la primera
    /// variante disponible.
    pub fn from_detail(detail: RutaDetailResponse) -> Option<RouteSelection> {
        if detail.routes.is_empty() {
            debug!(codigo = %detail.codigo, "route detail without variants");
            return None;
        }
        let direction = if detail
            .routes
            .iter()
            .any(|variant| variant.direction() == Some(Direction::Ida))
        {
            Direction::Ida
        } else {
            detail
                .routes
                .iter()
                .find_map(|variant| variant.direction())
                .unwrap_or(Direction::Ida)
        };
        Some(RouteSelection {
            codigo: detail.codigo,
            variants: detail.routes,
            direction,
        })
    }

    /// Variante activa según el sentido seleccionado.
    pub fn active_variant(&self) -> Option<&RutaFeature> {
        self.variants
            .iter()
            .find(|variant| variant.direction() == Some(self.direction))
    }

    /// Cambia el sentido activo solo si existe una variante con ese sentido.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        let available = self
            .variants
            .iter()
            .any(|variant| variant.direction() == Some(direction));
        if available {
            self.direction = direction;
        }
        available
    }

    /// Sentidos con variante disponible, en orden IDA, REGRESO.
    pub fn directions_available(&self) -> Vec<Direction> {
        [Direction::Ida, Direction::Regreso]
            .into_iter()
            .filter(|direction| {
                self.variants
                    .iter()
                    .any(|variant| variant.direction() == Some(*direction))
            })
            .collect()
    }
}
