use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Data source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Too many results for block range {from}..={to}")]
    TooManyResults { from: u64, to: u64 },

    #[error("Partial scan failure: {0}")]
    PartialScan(String),

    #[error("RPC error: {0}")]
    RpcError(#[from] ethers::providers::ProviderError),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ScoutError {
    /// Whether a range query should be retried with a smaller block span
    pub fn is_too_many_results(&self) -> bool {
        matches!(self, ScoutError::TooManyResults { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
