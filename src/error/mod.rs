use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum HnError {
    /// The top-story listing call failed. Without the ranked id list no
    /// partial result is meaningful, so this aborts the retrieval cycle.
    #[error("Listing Error: {0}")]
    Listing(String),

    /// Network/connectivity issues
    #[error("Network Error: {0}")]
    Network(String),

    /// Payload decoding issues
    #[error("Parse Error: {0}")]
    Parse(String),

    /// Configuration errors
    #[error("Config Error: {0}")]
    Config(String),

    /// HTTP listener errors
    #[error("Server Error: {0}")]
    Server(String),
}

impl From<reqwest::Error> for HnError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            HnError::Parse(format!("Response body error: {}", err))
        } else {
            HnError::Network(format!("HTTP request error: {}", err))
        }
    }
}

impl From<serde_json::Error> for HnError {
    fn from(err: serde_json::Error) -> Self {
        HnError::Parse(format!("JSON serialization/deserialization error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, HnError>;
