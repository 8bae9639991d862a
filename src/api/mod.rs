pub mod _structs;
pub mod client;
pub mod places;
pub mod routing;
pub mod rutas;
pub mod trip;

pub use _structs::*;
pub use client::{ApiClient, ApiError};
pub use routing::WalkRouteCache;
