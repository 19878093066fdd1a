use thiserror::Error;

/// Top-level error type shared by every prefsync crate.
#[derive(Debug, Error)]
pub enum PrefError {
    #[error("config error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Store(String),

    #[error("tabs error: {0}")]
    Tabs(String),

    #[error("action icon error: {0}")]
    Icon(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

pub type Result<T, E = PrefError> = std::result::Result<T, E>;
