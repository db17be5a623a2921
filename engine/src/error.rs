use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Expected during warm-up; callers skip evaluation instead of surfacing it.
    #[error("Insufficient data: need {required} candles, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("HTTP error: {source}")]
    HttpError {
        #[from]
        source: reqwest::Error,
    },

    #[error("WebSocket error: {source}")]
    WebSocketError {
        #[from]
        source: tokio_tungstenite::tungstenite::Error,
    },

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Notification error: {0}")]
    NotificationError(String),
}
