pub mod api;
pub mod config;
pub mod geolocation;
pub mod map;
pub mod planner;
pub mod rutas;

pub use api::{ApiClient, ApiError};
pub use config::AppConfig;
