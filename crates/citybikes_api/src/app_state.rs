use citybikes_engine::Engine;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::AppConfig;
use crate::map::Coordinate;

/// Outcome of the one-shot device location request.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Geolocation {
    /// No answer yet, the map is not rendered.
    #[default]
    Pending,
    Located(Coordinate),
    /// Permission denied or unsupported.
    Unavailable,
}

/// State shared by every request handler.
#[derive(Clone)]
pub struct ApiState {
    pub engine: Engine,
    pub config: Arc<AppConfig>,
    geolocation: Arc<Mutex<Geolocation>>,
}

impl ApiState {
    pub fn new(engine: Engine, config: AppConfig) -> Self {
        ApiState {
            engine,
            config: Arc::new(config),
            geolocation: Arc::default(),
        }
    }

    pub fn geolocation(&self) -> Geolocation {
        *self
            .geolocation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_geolocation(&self, geolocation: Geolocation) {
        *self
            .geolocation
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = geolocation;
    }
}
