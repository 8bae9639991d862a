pub mod _structs;
pub mod search;
pub mod selection;

pub use _structs::*;
pub use search::{is_route_query, normalize_route_query, RouteCatalog};
pub use selection::RouteSelection;
