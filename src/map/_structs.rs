use geo::{Coord, Rect};

/// Estado del bottom sheet que ocluye la parte baja del mapa en móvil.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetState {
    Hidden,
    Peek,
    Half,
    Full,
}

/// Dimensiones actuales de la ventana y estado del overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub sheet: SheetState,
}

impl Viewport {
    pub fn new(width: f64, height: f64, sheet: SheetState) -> Self {
        Self { width, height, sheet }
    }

    /// Breakpoint móvil (coincide con el breakpoint `sm` del cliente web).
    pub fn is_mobile(&self) -> bool {
        self.width < 640.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            sheet: SheetState::Hidden,
        }
    }
}

/// Padding asimétrico en píxeles para fitBounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// Comando de cámara enviado al componente dueño del mapa.
#[derive(Debug, Clone, PartialEq)]
pub enum MapCommand {
    EaseTo {
        center: Coord,
        zoom: f64,
        offset: (f64, f64),
        duration_ms: u64,
    },
    FitBounds {
        bounds: Rect,
        padding: Padding,
        max_zoom: f64,
        duration_ms: u64,
    },
}
