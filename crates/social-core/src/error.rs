use thiserror::Error;

/// Top-level error type for configuration and user input.
#[derive(Error, Debug)]
pub enum SocialError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, SocialError>;
