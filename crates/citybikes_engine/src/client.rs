use async_trait::async_trait;
use citybikes_core::{
    ApiError, Failure, FetchContext, Network, NetworkDetailResponse, NetworksResponse, Station,
};
use hyper::ext::ReasonPhrase;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Read access to the bike-share API.
///
/// Implementations never touch the application state; every failure is
/// returned as a normalized [`ApiError`].
#[async_trait]
pub trait CityBikesSource: Send + Sync {
    async fn fetch_network_list(&self) -> Result<Vec<Network>, ApiError>;

    async fn fetch_station_list(&self, network_id: &str) -> Result<Vec<Station>, ApiError>;
}

/// [`CityBikesSource`] backed by the public HTTP API.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(HttpSource { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        context: &FetchContext,
    ) -> Result<T, ApiError> {
        let url = self.url_for(segments).ok_or_else(|| {
            let detail = format!("Invalid base URL {}", self.base_url);
            ApiError::normalize(Failure::Other(detail), context)
        })?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::normalize(classify(&e), context))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("HTTP error {} while {}", status, context);
            return Err(ApiError::normalize(
                Failure::Status {
                    code: status.as_u16(),
                    reason: reason_phrase(&response),
                },
                context,
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::normalize(Failure::Other(e.to_string()), context))
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn url_for(&self, segments: &[&str]) -> Option<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url).ok()?;
        url.path_segments_mut().ok()?.pop_if_empty().extend(segments);
        Some(url)
    }
}

/// The reason phrase the server sent, or the standard one for the status.
fn reason_phrase(response: &reqwest::Response) -> Option<String> {
    match response.extensions().get::<ReasonPhrase>() {
        Some(reason) => Some(String::from_utf8_lossy(reason.as_bytes()).into_owned()),
        None => response.status().canonical_reason().map(str::to_string),
    }
}

fn classify(error: &reqwest::Error) -> Failure {
    match error.status() {
        Some(status) => Failure::Status {
            code: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
        },
        None if error.is_connect() || error.is_timeout() || error.is_request() => {
            Failure::Transport(error.to_string())
        }
        None => Failure::Other(error.to_string()),
    }
}

#[async_trait]
impl CityBikesSource for HttpSource {
    async fn fetch_network_list(&self) -> Result<Vec<Network>, ApiError> {
        let response: NetworksResponse =
            self.get_json(&["networks"], &FetchContext::Networks).await?;
        tracing::debug!("Fetched {} networks", response.networks.len());
        Ok(response.networks)
    }

    async fn fetch_station_list(&self, network_id: &str) -> Result<Vec<Station>, ApiError> {
        let context = FetchContext::Stations {
            network_id: network_id.to_string(),
        };
        let response: NetworkDetailResponse =
            self.get_json(&["networks", network_id], &context).await?;
        tracing::debug!(
            "Fetched {} stations for network {}",
            response.network.stations.len(),
            network_id
        );
        Ok(response.network.stations)
    }
}
