use thiserror::Error;
use tokio_tungstenite::tungstenite;

#[derive(Error, Debug)]
pub enum BunpoError {
    #[error("WebSocket error: {0}")]
    WebSocket(Box<tungstenite::Error>),

    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Request error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Failed to load email template: {0}")]
    MissingTemplate(String),

    #[error("Failed to send email")]
    EmailSend,

    #[error("BunpoError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for BunpoError {
    fn from(error: std::io::Error) -> Self {
        BunpoError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for BunpoError {
    fn from(error: reqwest::Error) -> Self {
        BunpoError::Reqwest(Box::new(error))
    }
}

impl From<tungstenite::Error> for BunpoError {
    fn from(error: tungstenite::Error) -> Self {
        BunpoError::WebSocket(Box::new(error))
    }
}
