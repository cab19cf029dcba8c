//! Error types for hansik

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Menu for {0} not found")]
    MenuNotFound(String),

    #[error("Invalid menu table: {0}")]
    InvalidMenu(String),

    #[error("Failed to scrape menu: {0}")]
    Scrape(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Vision API error {status}: {message}")]
    VisionApi { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn menu_not_found(day: impl Into<String>) -> Self {
        Error::MenuNotFound(day.into())
    }

    pub fn scrape(msg: impl Into<String>) -> Self {
        Error::Scrape(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }
}
