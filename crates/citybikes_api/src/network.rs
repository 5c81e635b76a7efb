use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::app_state::ApiState;

/// Network marker clicked: select it and load its stations
pub async fn select_network(
    State(api_state): State<ApiState>,
    Path(network_id): Path<String>,
) -> StatusCode {
    api_state.engine.select_network(&network_id);
    StatusCode::ACCEPTED
}

/// Reload the network list
pub async fn refresh_networks(State(api_state): State<ApiState>) -> StatusCode {
    api_state.engine.start_fetch_networks();
    StatusCode::ACCEPTED
}
