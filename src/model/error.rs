use thiserror::Error;

/// Problems with the service catalog. Only `Empty` can reach the game session;
/// the rest are raised while loading and handled by falling back.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("service catalog is empty")]
    Empty,
    #[error("failed to read service catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse service catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("service record {index} ({name:?}) is invalid: {reason}")]
    InvalidRecord {
        index: usize,
        name: String,
        reason: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("grid {0:?} is not a permutation of 0..=8")]
    InvalidGrid(Vec<u8>),
    #[error("shuffle needs at least {min} steps, got {steps}")]
    ShuffleTooShort { steps: usize, min: usize },
}
