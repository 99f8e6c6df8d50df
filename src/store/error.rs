//! Error handling for the data access shim.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-success status from the backend. The body is passed through
    /// untranslated; callers receive whatever the backend produced.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// Failed to decode a JSON response body.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A count request came back without a usable `Content-Range` total.
    #[error("Malformed count response: {0}")]
    Count(String),

    /// `single()` matched no row.
    #[error("Row not found")]
    RowNotFound,
}

impl StoreError {
    pub async fn from_response(response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        StoreError::Http { status, message }
    }
}
