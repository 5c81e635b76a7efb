mod detail;
mod error;
mod models;

pub use crate::detail::*;
pub use crate::error::*;
pub use crate::models::*;

use serde::{Deserialize, Serialize};

const UNEXPECTED_NETWORKS_ERROR: &str = "Unexpected error while fetching networks";
const UNEXPECTED_STATIONS_ERROR: &str = "Unexpected error while fetching stations";

/// Lifecycle of one async fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    Pending,
    Fulfilled(T),
    /// `None` when the fetch ended without a usable error payload.
    Rejected(Option<ApiError>),
}

/// Every mutation of [`AppState`] goes through one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetSelectedNetwork(String),
    ClearSelectedNetwork,
    ClearError,
    FetchNetworks(Phase<Vec<Network>>),
    FetchStations(Phase<Vec<Station>>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    networks: Vec<Network>,
    stations: Vec<Station>,
    selected_network_id: Option<String>,
    loading: bool,
    error: Option<ApiError>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn networks(&self) -> &[Network] {
        &self.networks
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn selected_network_id(&self) -> Option<&str> {
        self.selected_network_id.as_deref()
    }

    /// The selected network, if the selected id matches a loaded network.
    pub fn selected_network(&self) -> Option<&Network> {
        let id = self.selected_network_id.as_deref()?;
        self.networks.iter().find(|network| network.id == id)
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    /// Apply an action, returning the next state.
    pub fn reduce(mut self, action: Action) -> Self {
        self.apply(action);
        self
    }

    /// Apply an action in place.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetSelectedNetwork(id) => {
                self.selected_network_id = Some(id);
            }
            Action::ClearSelectedNetwork => {
                self.selected_network_id = None;
                self.stations.clear();
            }
            Action::ClearError => {
                self.error = None;
            }
            Action::FetchNetworks(phase) => match phase {
                Phase::Pending => self.start_loading(),
                Phase::Fulfilled(networks) => {
                    self.loading = false;
                    self.error = None;
                    self.networks = networks;
                }
                Phase::Rejected(payload) => self.fail(payload, UNEXPECTED_NETWORKS_ERROR),
            },
            Action::FetchStations(phase) => match phase {
                Phase::Pending => self.start_loading(),
                Phase::Fulfilled(stations) => {
                    self.loading = false;
                    self.error = None;
                    self.stations = stations;
                }
                Phase::Rejected(payload) => self.fail(payload, UNEXPECTED_STATIONS_ERROR),
            },
        }
    }

    fn start_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fail(&mut self, payload: Option<ApiError>, fallback: &str) {
        self.loading = false;
        self.error = Some(payload.unwrap_or_else(|| ApiError::new(fallback, 500)));
    }
}
