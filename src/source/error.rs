//! Error handling for the data source module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// The response body was not valid JSON.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The data source answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },
}

impl SourceError {
    pub async fn from_response(response: reqwest::Response) -> SourceError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        SourceError::Http { status, message }
    }
}
