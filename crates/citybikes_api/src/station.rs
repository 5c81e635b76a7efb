use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use citybikes_core::StationDetail;

use crate::ErrorResponse;
use crate::app_state::ApiState;

/// Popup content for one station of the selected network
pub async fn get_station_detail(
    State(api_state): State<ApiState>,
    Path(station_id): Path<String>,
) -> Response {
    let detail = api_state.engine.store().read(|state| {
        state
            .stations()
            .iter()
            .find(|station| station.id == station_id)
            .map(StationDetail::from_station)
    });

    match detail {
        Some(detail) => Json(detail).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Station {} not found", station_id),
            }),
        )
            .into_response(),
    }
}
