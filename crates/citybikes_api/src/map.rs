use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use citybikes_core::{AppState, Network, Station};
use serde::{Deserialize, Serialize};

use crate::ErrorResponse;
use crate::app_state::{ApiState, Geolocation};
use crate::config::AppConfig;

const TITLE: &str = "City Bikes Map";
const SELECT_PROMPT: &str = "Select a Network";
const UNKNOWN_NETWORK: &str = "Unknown network";
const LOADING_TEXT: &str = "Loading map data...";
const BACK_LABEL: &str = "Back to Networks";
const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";
const BIKE_ICON_URL: &str = "/assets/city-bikes-map/toy.png";
const USER_ICON_URL: &str = "/assets/city-bikes-map/user.png";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub url: String,
    pub size: [u32; 2],
    pub anchor: [u32; 2],
    pub popup_anchor: [f64; 2],
}

impl Icon {
    fn new(url: &str) -> Self {
        Icon {
            url: url.to_string(),
            size: [30, 30],
            anchor: [9, 30],
            popup_anchor: [5.8, -28.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub id: String,
    pub position: Coordinate,
    pub icon: Icon,
    /// Path to POST when the marker is clicked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_click: Option<String>,
    /// Path to GET for the popup content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup: Option<String>,
}

impl Marker {
    fn network(network: &Network) -> Self {
        Marker {
            id: network.id.clone(),
            position: Coordinate {
                latitude: network.location.latitude,
                longitude: network.location.longitude,
            },
            icon: Icon::new(BIKE_ICON_URL),
            on_click: Some(format!("/networks/{}/select", network.id)),
            popup: None,
        }
    }

    fn station(station: &Station) -> Self {
        Marker {
            id: station.id.clone(),
            position: Coordinate {
                latitude: station.latitude,
                longitude: station.longitude,
            },
            icon: Icon::new(BIKE_ICON_URL),
            on_click: None,
            popup: Some(format!("/stations/{}", station.id)),
        }
    }

    fn user(position: Coordinate) -> Self {
        Marker {
            id: "user".to_string(),
            position,
            icon: Icon::new(USER_ICON_URL),
            on_click: None,
            popup: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Layer {
    /// Every network, clustered by the map surface
    Networks { clustered: bool, markers: Vec<Marker> },
    /// Stations of the selected network
    Stations { markers: Vec<Marker> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    pub url: String,
    pub attribution: String,
    pub no_wrap: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackControl {
    pub label: String,
    pub action: String,
}

/// Everything the map front-end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub title: String,
    pub heading: String,
    pub loading: Option<String>,
    pub error_banner: Option<String>,
    pub center: Coordinate,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_bounds: [Coordinate; 2],
    pub tile_layer: TileLayer,
    pub layer: Option<Layer>,
    pub user_marker: Option<Marker>,
    pub back_control: Option<BackControl>,
}

/// Build the map view, or `None` while the device location is still pending.
pub fn render_map(
    state: &AppState,
    geolocation: Geolocation,
    config: &AppConfig,
) -> Option<MapView> {
    let (center, zoom, user_location) = match geolocation {
        Geolocation::Pending => return None,
        Geolocation::Located(position) => (position, config.located_zoom, Some(position)),
        Geolocation::Unavailable => (config.default_center, config.default_zoom, None),
    };

    let selected = state.selected_network_id().is_some();
    let heading = match (state.selected_network_id(), state.selected_network()) {
        (None, _) => SELECT_PROMPT.to_string(),
        (Some(_), Some(network)) => network.name.clone(),
        (Some(_), None) => UNKNOWN_NETWORK.to_string(),
    };

    let layer = if !selected {
        Some(Layer::Networks {
            clustered: true,
            markers: state.networks().iter().map(Marker::network).collect(),
        })
    } else if !state.stations().is_empty() {
        Some(Layer::Stations {
            markers: state.stations().iter().map(Marker::station).collect(),
        })
    } else {
        None
    };

    Some(MapView {
        title: TITLE.to_string(),
        heading,
        loading: state.loading().then(|| LOADING_TEXT.to_string()),
        error_banner: state.error().map(|error| error.to_string()),
        center,
        zoom,
        min_zoom: config.min_zoom,
        max_bounds: [
            Coordinate {
                latitude: -85.0,
                longitude: -180.0,
            },
            Coordinate {
                latitude: 85.0,
                longitude: 180.0,
            },
        ],
        tile_layer: TileLayer {
            url: TILE_URL.to_string(),
            attribution: TILE_ATTRIBUTION.to_string(),
            no_wrap: true,
        },
        layer,
        user_marker: user_location.map(Marker::user),
        back_control: selected.then(|| BackControl {
            label: BACK_LABEL.to_string(),
            action: "/back".to_string(),
        }),
    })
}

/// Get the current map view
pub async fn get_map(State(api_state): State<ApiState>) -> Response {
    let geolocation = api_state.geolocation();
    let view = api_state
        .engine
        .store()
        .read(|state| render_map(state, geolocation, &api_state.config));
    match view {
        Some(view) => Json(view).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Go back from the stations of a network to the network overview
pub async fn go_back(State(api_state): State<ApiState>) -> Response {
    let selected = api_state
        .engine
        .store()
        .read(|state| state.selected_network_id().is_some());
    if !selected {
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "No network is selected".to_string(),
            }),
        )
            .into_response();
    }

    api_state.engine.go_back();
    StatusCode::NO_CONTENT.into_response()
}
