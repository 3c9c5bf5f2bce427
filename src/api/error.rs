use crate::models::ValidationError;

/// Failure of a single API call
///
/// Non-2xx responses are not errors; they come back as an envelope with
/// `success == false`.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unable to parse response body (status {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
    #[error("unable to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
