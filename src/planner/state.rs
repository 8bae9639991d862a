use geo::Coord;
use tracing::debug;

use super::_structs::{Location, TripOption, TripPlanResponse};
use crate::api::{trip, ApiClient, ApiError};
use crate::map::{send_command, FocusResolver, MapCommand, MapCommandSender};

/// Boleto de una petición de plan en vuelo. Lleva la generación del estado al
/// momento de salir; si el estado cambió antes de volver la respuesta, el
/// boleto queda obsoleto y el resultado se descarta.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanTicket {
    pub generation: u64,
    pub origin: Location,
    pub destination: Location,
}

/// Estado del planificador de viajes: origen/destino, plan vigente y qué
/// opción o tramo está enfocado en el mapa.
#[derive(Debug)]
pub struct TripPlanner {
    pub origin: Option<Location>,
    pub destination: Option<Location>,
    pub plan: Option<TripPlanResponse>,
    pub selected_option: Option<usize>,
    pub focused_leg: Option<usize>,
    pub selecting_origin: bool,
    pub selecting_destination: bool,
    generation: u64,
    focus: FocusResolver,
    map_tx: MapCommandSender,
}

impl TripPlanner {
    pub fn new(focus: FocusResolver, map_tx: MapCommandSender) -> Self {
        Self {
            origin: None,
            destination: None,
            plan: None,
            selected_option: None,
            focused_leg: None,
            selecting_origin: false,
            selecting_destination: false,
            generation: 0,
            focus,
            map_tx,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn focus_resolver_mut(&mut self) -> &mut FocusResolver {
        &mut self.focus
    }

    /// Cualquier cambio de origen o destino deja obsoleto el plan vigente y
    /// las respuestas en vuelo.
    fn invalidate(&mut self) {
        self.generation += 1;
        self.plan = None;
        self.selected_option = None;
        self.focused_leg = None;
    }

    pub fn set_origin(&mut self, origin: Option<Location>) {
        self.origin = origin;
        self.selecting_origin = false;
        self.invalidate();
        self.emit_endpoint_focus();
    }

    pub fn set_destination(&mut self, destination: Option<Location>) {
        self.destination = destination;
        self.selecting_destination = false;
        self.invalidate();
        self.emit_endpoint_focus();
    }

    pub fn swap_locations(&mut self) {
        std::mem::swap(&mut self.origin, &mut self.destination);
        self.invalidate();
        self.emit_endpoint_focus();
    }

    pub fn reset(&mut self) {
        self.origin = None;
        self.destination = None;
        self.selecting_origin = false;
        self.selecting_destination = false;
        self.invalidate();
    }

    /// Un tap en el mapa completa el extremo que está en modo selección. El
    /// nombre provisional son las coordenadas; la geocodificación inversa lo
    /// reemplaza después si responde.
    pub fn pick_on_map(&mut self, lat: f64, lng: f64) {
        let location = Location::named(lat, lng, format!("{:.4}, {:.4}", lat, lng));
        if self.selecting_origin {
            self.set_origin(Some(location));
        } else if self.selecting_destination {
            self.set_destination(Some(location));
        }
    }

    /// Abre un boleto de planificación si hay ambos extremos.
    pub fn begin_plan(&self) -> Option<PlanTicket> {
        Some(PlanTicket {
            generation: self.generation,
            origin: self.origin.clone()?,
            destination: self.destination.clone()?,
        })
    }

    /// Acepta la respuesta solo si el boleto sigue vigente.
    pub fn commit_plan(&mut self, ticket: &PlanTicket, plan: TripPlanResponse) -> bool {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "stale plan response discarded"
            );
            return false;
        }
        self.plan = Some(plan);
        self.selected_option = None;
        self.focused_leg = None;
        self.emit_endpoint_focus();
        true
    }

    /// Ciclo completo: pide el plan al backend y lo aplica si nadie tocó el
    /// estado mientras tanto. Devuelve si la respuesta fue aceptada.
    pub async fn plan(&mut self, api: &ApiClient) -> Result<bool, ApiError> {
        let Some(ticket) = self.begin_plan() else {
            return Ok(false);
        };
        let response = trip::plan_trip(api, &ticket.origin, &ticket.destination).await?;
        Ok(self.commit_plan(&ticket, response))
    }

    /// Selecciona una opción del plan y encuadra los extremos de sus tramos.
    /// Con None vuelve al encuadre origen/destino.
    pub fn select_option(&mut self, index: Option<usize>) {
        let Some(index) = index else {
            self.selected_option = None;
            self.focused_leg = None;
            self.emit_endpoint_focus();
            return;
        };
        let points = {
            let Some(option) = self.option_at(index) else {
                debug!(index, "option index out of range");
                return;
            };
            option_points(option)
        };
        self.selected_option = Some(index);
        self.focused_leg = None;
        if points.is_empty() {
            self.emit_endpoint_focus();
        } else {
            let command = self.focus.focus_legs(&points);
            self.emit(command);
        }
    }

    /// Enfoca un tramo de la opción seleccionada y encuadra sus dos extremos.
    /// Con None vuelve al encuadre de la opción completa.
    pub fn select_leg(&mut self, index: Option<usize>) {
        let Some(selected) = self.selected_option else {
            return;
        };
        let Some(index) = index else {
            self.focused_leg = None;
            self.select_option(Some(selected));
            return;
        };
        let points = {
            let Some(option) = self.option_at(selected) else {
                return;
            };
            let Some(leg) = option.legs.get(index) else {
                debug!(index, "leg index out of range");
                return;
            };
            [leg.from.coord(), leg.to.coord()]
        };
        self.focused_leg = Some(index);
        let command = self.focus.focus_legs(&points);
        self.emit(command);
    }

    fn option_at(&self, index: usize) -> Option<&TripOption> {
        self.plan.as_ref().and_then(|plan| plan.options.get(index))
    }

    fn emit_endpoint_focus(&self) {
        let origin = self.origin.as_ref().map(Location::coord);
        let destination = self.destination.as_ref().map(Location::coord);
        let command = self.focus.focus(origin, destination);
        self.emit(command);
    }

    fn emit(&self, command: Option<MapCommand>) {
        if let Some(command) = command {
            send_command(&self.map_tx, command);
        }
    }
}

fn option_points(option: &TripOption) -> Vec<Coord> {
    option
        .legs
        .iter()
        .flat_map(|leg| [leg.from.coord(), leg.to.coord()])
        .collect()
}
