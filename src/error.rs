use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Unknown priority: {0}")]
    UnknownPriority(String),

    #[error("Unknown issue state: {0}")]
    UnknownState(String),

    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),

    #[error("Invalid lexicon: {0}")]
    InvalidLexicon(String),
}
