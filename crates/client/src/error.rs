use higherme_core::LogInputError;
use thiserror::Error;

pub(crate) const DEFAULT_API_MESSAGE: &str = "An error occurred";
const NETWORK_STATUS: u16 = 500;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(#[from] LogInputError),
}

impl ClientError {
    /// HTTP-style status for display. Transport failures report 500.
    pub fn status(&self) -> u16 {
        match self {
            Self::Api { status, .. } => *status,
            Self::Network(_) | Self::Decode(_) => NETWORK_STATUS,
            Self::InvalidInput(_) => 400,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Pulls the `detail` string out of an error body, the shape the backend
/// uses for its failures.
pub(crate) fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_API_MESSAGE.to_string())
}
