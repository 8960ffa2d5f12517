//! Best-effort lookup of the route origin.
//!
//! The origin is optional everywhere: a slow, failing, or missing locator
//! yields a route without an origin, never an error.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{geolocation_error, AppResult};

/// A latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Render as the `lat,lon` form map links accept
    pub fn to_origin(self) -> String {
        format!("{:.6},{:.6}", self.latitude, self.longitude)
    }
}

/// Source of the caller's current position
#[async_trait]
pub trait GeoLocator: Send + Sync + 'static {
    async fn locate(&self) -> AppResult<Coordinates>;
}

/// Locator that asks an HTTP endpoint answering `{"latitude": .., "longitude": ..}`
pub struct HttpLocator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpLocator {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl GeoLocator for HttpLocator {
    async fn locate(&self) -> AppResult<Coordinates> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| geolocation_error(&format!("request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| geolocation_error(&format!("bad status: {}", e)))?;

        response
            .json::<Coordinates>()
            .await
            .map_err(|e| geolocation_error(&format!("invalid response: {}", e)))
    }
}

/// Ask the locator for an origin, giving up after `timeout`
pub async fn resolve_origin(
    locator: Option<&dyn GeoLocator>,
    timeout: Duration,
) -> Option<String> {
    let Some(locator) = locator else {
        debug!("No geolocator configured, routing without origin");
        return None;
    };

    match tokio::time::timeout(timeout, locator.locate()).await {
        Ok(Ok(coords)) => Some(coords.to_origin()),
        Ok(Err(e)) => {
            warn!("Geolocation failed, routing without origin: {}", e);
            None
        }
        Err(_) => {
            warn!("Geolocation timed out after {:?}, routing without origin", timeout);
            None
        }
    }
}
