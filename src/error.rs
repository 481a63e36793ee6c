use thiserror::Error;

use crate::screens::ScreenId;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("No option selected on {screen:?}: {message}")]
    NoOptionSelected { screen: ScreenId, message: String },

    #[error("Option {index} does not exist on {screen:?}")]
    InvalidOption { screen: ScreenId, index: usize },

    #[error("Invalid action '{input}': {reason}")]
    InvalidAction { input: String, reason: String },
}

pub type Result<T> = std::result::Result<T, FinderError>;
