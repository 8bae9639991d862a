use std::fmt;

use super::_structs::{Confidence, LegMode, TripLeg, TripOption};

/// Etiqueta de presentación de un tramo dentro de una opción de viaje.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegLabel {
    Salida,
    Llegada,
    Transbordo(usize),
    Bus(usize),
    Caminar,
}

impl fmt::Display for LegLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegLabel::Salida => write!(f, "Salida"),
            LegLabel::Llegada => write!(f, "Llegada"),
            LegLabel::Transbordo(n) => write!(f, "Transbordo {}", n),
            LegLabel::Bus(n) => write!(f, "Bus {}", n),
            LegLabel::Caminar => write!(f, "Caminar"),
        }
    }
}

/// Un tramo a pie es transbordo solo si queda estrictamente entre dos buses.
pub fn is_transfer_walk(legs: &[TripLeg], index: usize) -> bool {
    if index == 0 || index + 1 >= legs.len() {
        return false;
    }
    legs[index].mode == LegMode::Walk
        && legs[index - 1].mode == LegMode::Bus
        && legs[index + 1].mode == LegMode::Bus
}

pub fn transfer_count(legs: &[TripLeg]) -> usize {
    (0..legs.len())
        .filter(|&index| is_transfer_walk(legs, index))
        .count()
}

/// Etiqueta cada tramo. Los buses y transbordos llevan ordinal propio; el
/// primer y último tramo a pie se etiquetan como salida y llegada.
pub fn leg_labels(legs: &[TripLeg]) -> Vec<LegLabel> {
    let mut bus_ordinal = 0;
    let mut transfer_ordinal = 0;
    let last = legs.len().saturating_sub(1);
    legs.iter()
        .enumerate()
        .map(|(index, leg)| match leg.mode {
            LegMode::Bus => {
                bus_ordinal += 1;
                LegLabel::Bus(bus_ordinal)
            }
            LegMode::Walk if is_transfer_walk(legs, index) => {
                transfer_ordinal += 1;
                LegLabel::Transbordo(transfer_ordinal)
            }
            LegMode::Walk if index == 0 => LegLabel::Salida,
            LegMode::Walk if index == last => LegLabel::Llegada,
            LegMode::Walk => LegLabel::Caminar,
        })
        .collect()
}

/// Resumen listo para la tarjeta de una opción.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSummary {
    pub duration: String,
    pub walking: String,
    pub transfers: u32,
    pub confidence: Confidence,
}

pub fn summarize(option: &TripOption) -> OptionSummary {
    let transfers = option
        .total_transfers
        .unwrap_or_else(|| transfer_count(&option.legs) as u32);
    OptionSummary {
        duration: format_duration(option.estimated_time_m),
        walking: format_distance(option.total_walking_m),
        transfers,
        confidence: option.confidence,
    }
}

/// Duración en minutos como "N min" o "Xh Ymin".
pub fn format_duration(minutes: f64) -> String {
    let total = minutes.round() as u64;
    if total < 60 {
        format!("{} min", total)
    } else {
        format!("{}h {}min", total / 60, total % 60)
    }
}

/// Distancia en metros como "N m" o "X.X km".
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{} m", meters.round() as u64)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}
