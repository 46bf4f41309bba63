//! Error type shared by every fallible client operation.

/// Failure raised while talking to the server, the browser, or the page config.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (network failure, CORS, abort).
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success HTTP status where one was required.
    #[error("Network response was not ok (status {0})")]
    Status(u16),
    /// A response or config body was not the JSON shape we expected.
    #[error("invalid json: {0}")]
    Decode(#[from] serde_json::Error),
    /// The body parsed but is not something a form endpoint can answer with.
    #[error("unexpected response body: {0}")]
    UnexpectedBody(&'static str),
    /// A success payload lacked a field the caller needs.
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
    /// Browser storage is unavailable or rejected a write.
    #[error("storage unavailable: {0}")]
    Storage(String),
    /// A browser DOM API threw.
    #[error("dom call failed: {0}")]
    Dom(String),
    /// The page-provided client config is invalid.
    #[error("invalid client config: {0}")]
    Config(String),
}
