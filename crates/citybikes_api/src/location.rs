use axum::{Json, extract::State, http::StatusCode};

use crate::app_state::{ApiState, Geolocation};
use crate::map::Coordinate;

/// The device reported its position
pub async fn located(
    State(api_state): State<ApiState>,
    Json(position): Json<Coordinate>,
) -> StatusCode {
    tracing::info!(
        "Device located at {}, {}",
        position.latitude,
        position.longitude
    );
    resolve(&api_state, Geolocation::Located(position));
    StatusCode::NO_CONTENT
}

/// The device position is unavailable (denied or unsupported)
pub async fn unavailable(State(api_state): State<ApiState>) -> StatusCode {
    tracing::info!("Device location unavailable, using default center");
    resolve(&api_state, Geolocation::Unavailable);
    StatusCode::NO_CONTENT
}

fn resolve(api_state: &ApiState, geolocation: Geolocation) {
    api_state.set_geolocation(geolocation);

    // The map has a center now; load the overview if nothing is loaded yet
    let needs_networks = api_state
        .engine
        .store()
        .read(|state| state.networks().is_empty());
    if needs_networks {
        api_state.engine.start_fetch_networks();
    }
}
