//! Data access and async fetch flows for the city bikes map.
//!
//! Each flow commits `Pending` into the [`Store`] before its request starts,
//! then commits exactly one settlement (`Fulfilled` or `Rejected`). Flows are
//! neither deduplicated nor cancelled: when two fetches of the same kind
//! overlap, the one that settles last wins.

mod client;
mod store;

pub use crate::client::{CityBikesSource, HttpSource};
pub use crate::store::Store;

use citybikes_core::{Action, ApiError, Phase};
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};

#[derive(Clone)]
pub struct Engine {
    store: Store,
    source: Arc<dyn CityBikesSource>,
}

impl Engine {
    pub fn new(store: Store, source: Arc<dyn CityBikesSource>) -> Self {
        Engine { store, source }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Start the network list flow. The returned handle resolves once the
    /// settlement is committed.
    pub fn start_fetch_networks(&self) -> JoinHandle<()> {
        tracing::info!("Fetching networks");
        self.store.dispatch(Action::FetchNetworks(Phase::Pending));

        let source = Arc::clone(&self.source);
        let request = tokio::spawn(async move { source.fetch_network_list().await });

        let store = self.store.clone();
        tokio::spawn(async move {
            let phase = settle(request.await, "networks");
            store.dispatch(Action::FetchNetworks(phase));
        })
    }

    /// Start the station list flow for one network.
    pub fn start_fetch_stations(&self, network_id: &str) -> JoinHandle<()> {
        tracing::info!("Fetching stations for network {}", network_id);
        self.store.dispatch(Action::FetchStations(Phase::Pending));

        let source = Arc::clone(&self.source);
        let id = network_id.to_string();
        let request = tokio::spawn(async move { source.fetch_station_list(&id).await });

        let store = self.store.clone();
        let label = format!("stations for network {}", network_id);
        tokio::spawn(async move {
            let phase = settle(request.await, &label);
            store.dispatch(Action::FetchStations(phase));
        })
    }

    pub async fn fetch_networks(&self) {
        await_flow(self.start_fetch_networks()).await;
    }

    pub async fn fetch_stations(&self, network_id: &str) {
        await_flow(self.start_fetch_stations(network_id)).await;
    }

    /// Network marker activation: select the network, then load its stations.
    pub fn select_network(&self, network_id: &str) -> JoinHandle<()> {
        tracing::info!("Selecting network {}", network_id);
        self.store.dispatch(Action::SetSelectedNetwork(network_id.to_string()));
        self.start_fetch_stations(network_id)
    }

    /// Back to the network overview.
    pub fn go_back(&self) {
        tracing::info!("Returning to network overview");
        self.store.dispatch(Action::ClearSelectedNetwork);
        self.store.dispatch(Action::ClearError);
    }
}

fn settle<T>(result: Result<Result<T, ApiError>, JoinError>, what: &str) -> Phase<T> {
    match result {
        Ok(Ok(value)) => {
            tracing::info!("Fetched {}", what);
            Phase::Fulfilled(value)
        }
        Ok(Err(error)) => {
            tracing::warn!("Failed to fetch {}: {}", what, error);
            Phase::Rejected(Some(error))
        }
        Err(error) => {
            tracing::error!("Fetch task for {} ended abnormally: {}", what, error);
            Phase::Rejected(None)
        }
    }
}

async fn await_flow(handle: JoinHandle<()>) {
    if let Err(error) = handle.await {
        tracing::error!("Flow task failed: {}", error);
    }
}
