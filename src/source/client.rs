//! HTTP Data Source Client
//!
//! A reqwest client for the sensor data source's discovery and data endpoints.

use crate::endpoints::Endpoints;
use crate::source::DataSource;
use crate::source::error::SourceError;
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;

// User-Agent string with dashboard version
const USER_AGENT: &str = concat!("quadrant-dash/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HttpDataSource {
    client: Client,
    endpoints: Endpoints,
}

impl HttpDataSource {
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Self {
        Self {
            client: ClientBuilder::new()
                .connect_timeout(timeout)
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
            endpoints,
        }
    }

    async fn handle_response_status(response: Response) -> Result<Response, SourceError> {
        if !response.status().is_success() {
            return Err(SourceError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_json(
        &self,
        url: &str,
        header: Option<(&str, &str)>,
    ) -> Result<serde_json::Value, SourceError> {
        log::debug!("GET {}", url);
        let mut request = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json");
        if let Some((name, value)) = header {
            request = request.header(name, value);
        }

        let response = request.send().await?;
        let response = Self::handle_response_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait::async_trait]
impl DataSource for HttpDataSource {
    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn fetch_discovery(&self) -> Result<serde_json::Value, SourceError> {
        let url = self.endpoints.discovery_url();
        self.get_json(&url, self.endpoints.discovery.header()).await
    }

    async fn fetch_readings(&self, field: &str) -> Result<serde_json::Value, SourceError> {
        let url = self.endpoints.data_url(field);
        self.get_json(&url, None).await
    }
}

#[cfg(test)]
/// These are ignored by default since they require a live data source.
/// Point `QUADRANT_DASH_URL` at one to run them.
mod live_source_tests {
    use super::HttpDataSource;
    use crate::consts::cli_consts::http;
    use crate::endpoints::{DiscoveryMode, Endpoints};
    use crate::source::DataSource;
    use std::time::Duration;

    fn live_source() -> HttpDataSource {
        let base_url = std::env::var(http::BASE_URL_ENV)
            .unwrap_or_else(|_| http::DEFAULT_BASE_URL.to_string());
        let endpoints = Endpoints::new(base_url, DiscoveryMode::Root, http::DEFAULT_DATA_PATH);
        HttpDataSource::new(endpoints, Duration::from_secs(5))
    }

    #[tokio::test]
    #[ignore] // This test requires a live data source.
    /// Should return scroll labels and box ids.
    async fn test_fetch_discovery() {
        match live_source().fetch_discovery().await {
            Ok(body) => println!("Discovery: {}", body),
            Err(e) => panic!("Failed to fetch discovery: {}", e),
        }
    }

    #[tokio::test]
    #[ignore] // This test requires a live data source.
    /// Should return four box readings for a field.
    async fn test_fetch_readings() {
        match live_source().fetch_readings("CO2").await {
            Ok(body) => println!("Readings: {}", body),
            Err(e) => panic!("Failed to fetch readings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::DiscoveryMode;

    #[tokio::test]
    /// A refused connection surfaces as a transport error, not a decode error.
    async fn test_unreachable_source_is_a_fetch_error() {
        let endpoints = Endpoints::new("http://127.0.0.1:9", DiscoveryMode::Setup, "/get_data");
        let source = HttpDataSource::new(endpoints, Duration::from_secs(2));

        let result = source.fetch_readings("CO2").await;
        match result {
            Err(SourceError::Reqwest(_)) => {}
            other => panic!("expected a transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_endpoints_are_exposed() {
        let endpoints = Endpoints::new("http://pi.local", DiscoveryMode::Root, "/get_data");
        let source = HttpDataSource::new(endpoints.clone(), Duration::from_secs(1));
        assert_eq!(source.endpoints(), &endpoints);
    }
}
