use crate::endpoints::Endpoints;
use crate::source::error::SourceError;

pub(crate) mod client;
pub use client::HttpDataSource;
pub mod error;

#[cfg(test)]
use mockall::automock;

/// The remote data source: one discovery endpoint and one data endpoint.
///
/// Both calls hand back the decoded JSON body untouched; shaping it into
/// labels and readings happens in [`crate::model`].
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    fn endpoints(&self) -> &Endpoints;

    /// Fetch the field labels and box identifiers.
    async fn fetch_discovery(&self) -> Result<serde_json::Value, SourceError>;

    /// Fetch the four quadrant readings for one field.
    async fn fetch_readings(&self, field: &str) -> Result<serde_json::Value, SourceError>;
}
