use super::client::{ApiClient, ApiError};
use crate::planner::{Location, TripPlanRequest, TripPlanResponse};

/// Pide al backend un plan de viaje entre dos puntos.
pub async fn plan_trip(
    api: &ApiClient,
    origin: &Location,
    destination: &Location,
) -> Result<TripPlanResponse, ApiError> {
    let request = TripPlanRequest {
        origin: origin.clone(),
        destination: destination.clone(),
    };
    api.post_json("/trip/plan", &request).await
}
