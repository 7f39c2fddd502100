use async_trait::async_trait;
use ethers::prelude::*;
use std::sync::Arc;
use crate::blockchain::ChainSource;
use crate::utils::{Result, ScoutError};

/// Provider error fragments meaning "narrow the block range"
const TOO_MANY_RESULTS_MARKERS: &[&str] = &[
    "-32005",
    "query returned more than",
    "too many results",
    "log response size exceeded",
    "block range is too wide",
    "block range too large",
];

/// Throttling is never a result-limit rejection, whatever else the message says
const RATE_LIMIT_MARKERS: &[&str] = &["rate limit", "request limit"];

/// Classify a provider error message as a result-limit rejection
pub fn is_too_many_results(message: &str) -> bool {
    let msg = message.to_ascii_lowercase();
    if RATE_LIMIT_MARKERS.iter().any(|marker| msg.contains(marker)) {
        return false;
    }
    TOO_MANY_RESULTS_MARKERS.iter().any(|marker| msg.contains(marker))
}

/// Blockchain RPC client
pub struct BlockchainClient {
    provider: Arc<Provider<Http>>,
    chain_id: u64,
}

impl BlockchainClient {
    /// Create a new client
    pub async fn new(rpc_url: &str) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| ScoutError::RpcError(
                ProviderError::CustomError(format!("Invalid RPC URL: {}", e))
            ))?;

        let provider = Arc::new(provider);

        let chain_id = provider.get_chainid().await?;

        tracing::info!("Connected to chain ID: {}", chain_id);

        Ok(Self {
            provider,
            chain_id: chain_id.as_u64(),
        })
    }

    /// Get chain ID
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Get chain name
    pub fn chain_name(&self) -> &'static str {
        match self.chain_id {
            1 => "Ethereum Mainnet",
            8453 => "Base",
            84532 => "Base Sepolia",
            _ => "Unknown Chain",
        }
    }
}

#[async_trait]
impl ChainSource for BlockchainClient {
    async fn block_number(&self) -> Result<u64> {
        let block = self.provider.get_block_number().await?;
        Ok(block.as_u64())
    }

    async fn get_logs(&self, from: u64, to: u64, address: Option<Address>) -> Result<Vec<Log>> {
        let mut filter = Filter::new().from_block(from).to_block(to);
        if let Some(address) = address {
            filter = filter.address(address);
        }

        match self.provider.get_logs(&filter).await {
            Ok(logs) => Ok(logs),
            Err(e) if is_too_many_results(&e.to_string()) => {
                tracing::debug!("Log query {}..={} rejected: {}", from, to, e);
                Err(ScoutError::TooManyResults { from, to })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_transaction(&self, hash: H256) -> Result<Option<Transaction>> {
        Ok(self.provider.get_transaction(hash).await?)
    }

    async fn get_receipt(&self, hash: H256) -> Result<Option<TransactionReceipt>> {
        Ok(self.provider.get_transaction_receipt(hash).await?)
    }

    async fn get_code(&self, address: Address) -> Result<Bytes> {
        tracing::debug!("Fetching bytecode for {:?}", address);
        Ok(self.provider.get_code(address, None).await?)
    }

    async fn block_timestamp(&self, number: u64) -> Result<Option<u64>> {
        let block = self.provider.get_block(number).await?;
        Ok(block.map(|b| b.timestamp.as_u64()))
    }
}
