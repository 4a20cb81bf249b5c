//! Errors returned by the IP group client.

use nfa_common::IpGroupError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The model or codec rejected the group.
    #[error(transparent)]
    IpGroup(#[from] IpGroupError),

    /// The transport could not complete the request.
    #[error("transport failure: {0}")]
    Transport(#[from] anyhow::Error),

    /// The service answered with an `{"error": {...}}` body.
    #[error("api error {code}: {message}")]
    Api { code: String, message: String },

    /// The response could not be mapped onto the expected shape.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The response parsed but carried a value the model cannot represent.
    #[error("unexpected response: {0}")]
    Unexpected(String),
}
