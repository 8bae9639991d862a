use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use super::_structs::MapCommand;

pub type MapCommandSender = UnboundedSender<MapCommand>;
pub type MapCommandReceiver = UnboundedReceiver<MapCommand>;

/// Canal tipado entre los componentes que mueven la cámara y el dueño del
/// mapa. Reemplaza los eventos DOM ad hoc del cliente original.
pub fn command_channel() -> (MapCommandSender, MapCommandReceiver) {
    unbounded_channel()
}

/// Envía un comando ignorando un receptor cerrado (el mapa pudo desmontarse).
pub fn send_command(tx: &MapCommandSender, command: MapCommand) {
    if tx.send(command).is_err() {
        debug!("map command dropped: receiver closed");
    }
}
