//! City Bikes Map API Library
//!
//! This library serves the bike-share map as a render description and accepts
//! the map's user interactions.

pub mod app_state;
pub mod config;
mod location;
pub mod map;
mod network;
mod station;

use axum::{
    Router,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::app_state::ApiState;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Create the application router with all endpoints
pub fn create_app(api_state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/map", get(map::get_map))
        .route("/back", post(map::go_back))
        .route("/location", post(location::located))
        .route("/location/unavailable", post(location::unavailable))
        .route("/networks/refresh", post(network::refresh_networks))
        .route("/networks/{network_id}/select", post(network::select_network))
        .route("/stations/{station_id}", get(station::get_station_detail))
        .layer(TraceLayer::new_for_http())
        .with_state(api_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::map::{Layer, MapView};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use citybikes_core::{Action, ApiError, Location, Network, Phase, Station, StationDetail};
    use citybikes_engine::{CityBikesSource, Engine, Store};
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn network(id: &str, name: &str) -> Network {
        Network {
            id: id.into(),
            name: name.into(),
            company: vec![],
            location: Location {
                city: String::new(),
                country: String::new(),
                latitude: 0.0,
                longitude: 0.0,
            },
        }
    }

    fn station(id: &str) -> Station {
        Station {
            id: id.into(),
            name: "Station One".into(),
            latitude: 51.505,
            longitude: -0.09,
            free_bikes: 2,
            empty_slots: 3,
            timestamp: Some("not-a-date".into()),
            extra: None,
        }
    }

    struct FixedSource;

    #[async_trait]
    impl CityBikesSource for FixedSource {
        async fn fetch_network_list(&self) -> Result<Vec<Network>, ApiError> {
            Ok(vec![network("net1", "Network One")])
        }

        async fn fetch_station_list(&self, _network_id: &str) -> Result<Vec<Station>, ApiError> {
            Err(ApiError::new("Not Found", 404))
        }
    }

    /// Never answers, so flows stay pending.
    struct PendingSource;

    #[async_trait]
    impl CityBikesSource for PendingSource {
        async fn fetch_network_list(&self) -> Result<Vec<Network>, ApiError> {
            std::future::pending().await
        }

        async fn fetch_station_list(&self, _network_id: &str) -> Result<Vec<Station>, ApiError> {
            std::future::pending().await
        }
    }

    fn test_state(source: impl CityBikesSource + 'static) -> ApiState {
        let engine = Engine::new(Store::new(), Arc::new(source));
        ApiState::new(engine, AppConfig::default())
    }

    async fn post_empty(app: &Router, uri: &str) -> StatusCode {
        app.clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .method("POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    }

    async fn get_view(app: &Router) -> MapView {
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/map").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_app(test_state(PendingSource));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_map_is_empty_until_located() {
        let app = create_app(test_state(PendingSource));

        let response = app
            .oneshot(Request::builder().uri("/map").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_location_starts_network_fetch() {
        let state = test_state(PendingSource);
        let app = create_app(state.clone());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/location")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"latitude": 60.17, "longitude": 24.94}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let view = get_view(&app).await;
        assert_eq!(view.center.latitude, 60.17);
        assert_eq!(view.zoom, 13);
        assert!(view.user_marker.is_some());
        assert_eq!(view.loading.as_deref(), Some("Loading map data..."));
    }

    #[tokio::test]
    async fn test_location_unavailable_uses_default_center() {
        let state = test_state(PendingSource);
        let app = create_app(state.clone());

        assert_eq!(
            post_empty(&app, "/location/unavailable").await,
            StatusCode::NO_CONTENT
        );

        let view = get_view(&app).await;
        assert_eq!(view.center.latitude, 50.0);
        assert_eq!(view.center.longitude, 0.0);
        assert_eq!(view.zoom, 3);
        assert!(view.user_marker.is_none());
        assert!(state.engine.store().snapshot().loading());
    }

    #[tokio::test]
    async fn test_location_skips_fetch_when_networks_loaded() {
        let state = test_state(PendingSource);
        state
            .engine
            .store()
            .dispatch(Action::FetchNetworks(Phase::Fulfilled(vec![network(
                "net1",
                "Network One",
            )])));
        let app = create_app(state.clone());

        post_empty(&app, "/location/unavailable").await;
        assert!(!state.engine.store().snapshot().loading());
    }

    #[tokio::test]
    async fn test_network_overview_after_fetch() {
        let state = test_state(FixedSource);
        state.set_geolocation(app_state::Geolocation::Unavailable);
        state.engine.fetch_networks().await;
        let app = create_app(state);

        let view = get_view(&app).await;
        assert_eq!(view.heading, "Select a Network");
        assert_eq!(view.loading, None);
        match view.layer {
            Some(Layer::Networks { markers, .. }) => {
                assert_eq!(markers.len(), 1);
                assert_eq!(markers[0].on_click.as_deref(), Some("/networks/net1/select"));
            }
            other => panic!("Expected network layer, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_select_network() {
        let state = test_state(PendingSource);
        let app = create_app(state.clone());

        assert_eq!(post_empty(&app, "/networks/net1/select").await, StatusCode::ACCEPTED);

        let snapshot = state.engine.store().snapshot();
        assert_eq!(snapshot.selected_network_id(), Some("net1"));
        assert!(snapshot.loading());
    }

    #[tokio::test]
    async fn test_refresh_networks() {
        let state = test_state(PendingSource);
        let app = create_app(state.clone());

        assert_eq!(post_empty(&app, "/networks/refresh").await, StatusCode::ACCEPTED);
        assert!(state.engine.store().snapshot().loading());
    }

    #[tokio::test]
    async fn test_failed_selection_then_back() {
        let state = test_state(FixedSource);
        state.set_geolocation(app_state::Geolocation::Unavailable);
        state.engine.fetch_networks().await;
        state.engine.select_network("net1").await.unwrap();
        let app = create_app(state.clone());

        let view = get_view(&app).await;
        assert_eq!(view.heading, "Network One");
        assert_eq!(view.error_banner.as_deref(), Some("Error 404: Not Found"));
        assert!(view.back_control.is_some());

        assert_eq!(post_empty(&app, "/back").await, StatusCode::NO_CONTENT);

        let view = get_view(&app).await;
        assert_eq!(view.heading, "Select a Network");
        assert_eq!(view.error_banner, None);
        assert_eq!(view.back_control, None);
    }

    #[tokio::test]
    async fn test_back_without_selection() {
        let app = create_app(test_state(PendingSource));
        assert_eq!(post_empty(&app, "/back").await, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_station_detail() {
        let state = test_state(PendingSource);
        state
            .engine
            .store()
            .dispatch(Action::FetchStations(Phase::Fulfilled(vec![station("st1")])));
        let app = create_app(state);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/stations/st1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let detail: StationDetail = serde_json::from_slice(&body).unwrap();
        assert_eq!(detail.name, "Station One");
        assert_eq!(detail.bikes_available, 2);
        assert_eq!(detail.empty_slots, 3);
        assert_eq!(detail.address, "N/A");
        assert_eq!(detail.last_updated, "N/A");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/stations/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error_response: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error_response.error.contains("Station unknown not found"));
    }
}
