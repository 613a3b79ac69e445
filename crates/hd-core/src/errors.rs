/// Core error type for the helpdesk service.
///
/// Adapter crates map their specific errors into this type so the request
/// path can tell a provider failure (surfaced to the caller) from a
/// notification failure (logged and dropped).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The completion provider failed or returned an unusable shape.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The notification side channel failed (connect, auth or send).
    #[error("notification error: {0}")]
    Notification(String),
}

impl Error {
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::Upstream(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
