use thiserror::Error;

/// Errors surfaced by the Spotify catalog client
#[derive(Error, Debug)]
pub enum CatalogError {
    /// An operation was attempted before a token was obtained
    #[error("not authenticated")]
    Unauthenticated,

    /// Token exchange rejected or returned an unusable body
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Request could not be built or the network call failed
    #[error("request failed: {0}")]
    Transport(String),

    /// Non-success status from a catalog endpoint
    #[error("API returned status {status}: {body} (URL: {url})")]
    Api { status: u16, body: String, url: String },

    /// Response body did not match the expected shape
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl CatalogError {
    pub fn api(status: u16, body: String, url: &str) -> Self {
        let body = if body.trim().is_empty() {
            "(empty response)".to_string()
        } else {
            body
        };
        CatalogError::Api {
            status,
            body,
            url: url.to_string(),
        }
    }
}
