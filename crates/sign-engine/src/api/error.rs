use thiserror::Error;

/// Fatal to the current game: there is nothing left to ask.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("category `{category}` has no words and the alphabet fallback is empty")]
    NoWords { category: String },
    #[error("no category in the word source has any words")]
    EmptyWordSource,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown game mode `{0}`")]
    UnknownMode(String),
}
