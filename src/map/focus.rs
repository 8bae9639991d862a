use geo::{Coord, Rect};
use tracing::debug;

use super::_structs::{MapCommand, Padding, SheetState, Viewport};

const FOCUS_DURATION_MS: u64 = 1000;
const SINGLE_POINT_ZOOM: f64 = 15.0;

/// Tolerancia para que un span de exactamente 0.2° caiga en el escalón de 0.2°
/// a pesar del redondeo binario de las coordenadas.
const SPAN_EPSILON: f64 = 1e-9;

/// Escalones (span en grados, zoom) de mayor a menor span.
const SPAN_ZOOM_STEPS: [(f64, f64); 5] = [
    (0.5, 10.0),
    (0.2, 11.0),
    (0.1, 12.0),
    (0.05, 13.0),
    (0.02, 14.0),
];

/// Zoom discreto para encuadrar dos puntos separados por `span` grados.
/// Heurística gruesa a propósito: el encuadre fino lo termina de hacer el
/// fitBounds del mapa con el padding como pista.
pub fn zoom_for_span(span: f64) -> f64 {
    for (limit, zoom) in SPAN_ZOOM_STEPS {
        if span >= limit - SPAN_EPSILON {
            return zoom;
        }
    }
    SINGLE_POINT_ZOOM
}

/// Calcula comandos de cámara que mantienen visibles uno o dos puntos de
/// interés compensando los overlays de la UI (bottom sheet en móvil, panel
/// lateral en desktop).
#[derive(Debug, Clone)]
pub struct FocusResolver {
    viewport: Viewport,
}

impl FocusResolver {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Padding según viewport y estado del overlay.
    pub fn padding(&self) -> Padding {
        if self.viewport.is_mobile() {
            // La altura ocluida depende del estado del sheet; se deja siempre
            // una franja de mapa visible.
            let bottom = match self.viewport.sheet {
                SheetState::Hidden => 80.0,
                SheetState::Peek => 250.0,
                SheetState::Half => self.viewport.height * 0.48 + 20.0,
                SheetState::Full => self.viewport.height * 0.85 + 20.0,
            };
            return Padding {
                top: 100.0,
                bottom: bottom.min(self.viewport.height - 120.0),
                left: 40.0,
                right: 40.0,
            };
        }

        // Desktop: panel lateral fijo a la izquierda.
        Padding {
            top: 80.0,
            bottom: 80.0,
            left: 450.0,
            right: 80.0,
        }
    }

    /// Offset en píxeles para easeTo de un solo punto.
    pub fn offset(&self) -> (f64, f64) {
        if self.viewport.is_mobile() {
            (0.0, -50.0)
        } else {
            (150.0, 0.0)
        }
    }

    /// Enfoca un solo punto.
    pub fn focus_point(&self, center: Coord, zoom: Option<f64>) -> MapCommand {
        MapCommand::EaseTo {
            center,
            zoom: zoom.unwrap_or(SINGLE_POINT_ZOOM),
            offset: self.offset(),
            duration_ms: FOCUS_DURATION_MS,
        }
    }

    /// Encuadra dos puntos con padding asimétrico y tope de zoom.
    pub fn focus_pair(&self, a: Coord, b: Coord) -> MapCommand {
        let bounds = Rect::new(a, b);
        let span = bounds.width().max(bounds.height());
        MapCommand::FitBounds {
            bounds,
            padding: self.padding(),
            max_zoom: zoom_for_span(span),
            duration_ms: FOCUS_DURATION_MS,
        }
    }

    /// Encuadre de origen/destino: con ambos puntos encuadra el par, con uno
    /// solo lo centra, sin ninguno no hace nada.
    pub fn focus(&self, origin: Option<Coord>, destination: Option<Coord>) -> Option<MapCommand> {
        match (origin, destination) {
            (Some(a), Some(b)) => Some(self.focus_pair(a, b)),
            (Some(point), None) | (None, Some(point)) => Some(self.focus_point(point, None)),
            (None, None) => {
                debug!("focus requested without points");
                None
            }
        }
    }

    /// Encuadra un conjunto arbitrario de puntos (los extremos de los tramos
    /// de una opción de viaje).
    pub fn focus_legs(&self, points: &[Coord]) -> Option<MapCommand> {
        match points {
            [] => None,
            [only] => Some(self.focus_point(*only, None)),
            [first, rest @ ..] => {
                let mut min = *first;
                let mut max = *first;
                for point in rest {
                    min.x = min.x.min(point.x);
                    min.y = min.y.min(point.y);
                    max.x = max.x.max(point.x);
                    max.y = max.y.max(point.y);
                }
                Some(self.focus_pair(min, max))
            }
        }
    }
}

impl Default for FocusResolver {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> FocusResolver {
        FocusResolver::default()
    }

    fn mobile(sheet: SheetState) -> FocusResolver {
        FocusResolver::new(Viewport::new(390.0, 844.0, sheet))
    }

    #[test]
    fn test_single_point_focus() {
        let origin = Coord { x: -89.20, y: 13.70 };
        match desktop().focus(Some(origin), None) {
            Some(MapCommand::EaseTo { center, zoom, .. }) => {
                assert_eq!(center, origin);
                assert_eq!(zoom, 15.0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_two_point_framing() {
        let origin = Coord { x: -89.30, y: 13.60 };
        let destination = Coord { x: -89.10, y: 13.80 };
        match desktop().focus(Some(origin), Some(destination)) {
            Some(MapCommand::FitBounds { bounds, max_zoom, .. }) => {
                assert_eq!(max_zoom, 11.0);
                let center = bounds.center();
                assert!((center.x - (-89.20)).abs() < 1e-9);
                assert!((center.y - 13.70).abs() < 1e-9);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_zoom_steps() {
        assert_eq!(zoom_for_span(0.6), 10.0);
        assert_eq!(zoom_for_span(0.25), 11.0);
        assert_eq!(zoom_for_span(0.2), 11.0);
        assert_eq!(zoom_for_span(0.15), 12.0);
        assert_eq!(zoom_for_span(0.07), 13.0);
        assert_eq!(zoom_for_span(0.03), 14.0);
        assert_eq!(zoom_for_span(0.01), 15.0);
    }

    #[test]
    fn test_zoom_monotonic_in_span() {
        assert!(zoom_for_span(0.01) >= zoom_for_span(0.6));
        let spans = [0.01, 0.03, 0.07, 0.15, 0.25, 0.6];
        for pair in spans.windows(2) {
            assert!(zoom_for_span(pair[0]) >= zoom_for_span(pair[1]));
        }
    }

    #[test]
    fn test_no_points_is_noop() {
        assert!(desktop().focus(None, None).is_none());
        assert!(desktop().focus_legs(&[]).is_none());
    }

    #[test]
    fn test_offset_by_viewport() {
        assert_eq!(desktop().offset(), (150.0, 0.0));
        assert_eq!(mobile(SheetState::Peek).offset(), (0.0, -50.0));
    }

    #[test]
    fn test_padding_grows_with_sheet() {
        let peek = mobile(SheetState::Peek).padding();
        let half = mobile(SheetState::Half).padding();
        let full = mobile(SheetState::Full).padding();
        assert!(peek.bottom < half.bottom);
        assert!(half.bottom < full.bottom);
        // Siempre queda mapa visible.
        assert!(full.bottom < 844.0);
        // Desktop compensa el panel lateral, no el sheet.
        assert_eq!(desktop().padding().left, 450.0);
    }

    #[test]
    fn test_focus_legs_bounds() {
        let points = [
            Coord { x: -89.25, y: 13.65 },
            Coord { x: -89.15, y: 13.75 },
            Coord { x: -89.20, y: 13.70 },
        ];
        match desktop().focus_legs(&points) {
            Some(MapCommand::FitBounds { bounds, .. }) => {
                assert_eq!(bounds.min(), Coord { x: -89.25, y: 13.65 });
                assert_eq!(bounds.max(), Coord { x: -89.15, y: 13.75 });
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
