use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A bike-share system operated in one city or region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    pub name: String,
    /// Operating companies, possibly empty.
    #[serde(default)]
    pub company: Vec<String>,
    pub location: Location,
}

/// A docking point belonging to one network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub free_bikes: u32,
    pub empty_slots: u32,
    /// ISO-8601-like, sometimes carrying a redundant `+00:00Z` suffix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<StationExtra>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationExtra {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub last_update: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
}

/// `GET {base}/networks`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworksResponse {
    pub networks: Vec<Network>,
}

/// `GET {base}/networks/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkDetailResponse {
    pub network: NetworkDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkDetail {
    #[serde(default)]
    pub stations: Vec<Station>,
}
