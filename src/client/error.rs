use thiserror::Error;

/// Errors surfaced by the process store client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Credential file or profile problems. Fatal: the run aborts.
    #[error("credential error: {0}")]
    Credentials(String),

    /// Transport-level failure while talking to the server.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// The server answered 2xx but the payload did not parse.
    #[error("failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),
}
