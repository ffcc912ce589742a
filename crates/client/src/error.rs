use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Non-2xx answer; `message` is the server's `error` field when present.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}
