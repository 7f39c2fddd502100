//! Scanner configuration

use std::time::Duration;

pub const DEFAULT_RPC_URL: &str = "https://base.llamarpc.com";
pub const DEFAULT_ETHERSCAN_API_URL: &str = "https://api.etherscan.io/v2/api";
pub const BASE_CHAIN_ID: u64 = 8453;

/// Knobs for discovery. Caps and windows bound the cost of a single request.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub rpc_url: String,
    pub etherscan_api_key: Option<String>,
    pub etherscan_api_url: String,
    pub chain_id: u64,

    /// Budget for the transaction-history index call
    pub index_timeout: Duration,

    /// Transactions requested from the index per lookup
    pub index_page_size: usize,
    /// Max records from the indexed-API strategy
    pub indexed_cap: usize,
    /// Max records from the direct-scan strategy
    pub direct_scan_cap: usize,

    /// Blocks inspected by the direct scan, counting back from the chain head
    pub direct_scan_window: u64,
    pub initial_chunk_size: u64,
    pub min_chunk_size: u64,
    pub max_chunk_size: u64,
    /// Per-call log limit enforced by the RPC provider
    pub log_result_limit: usize,

    /// Trailing window for interaction counts (indexed strategy)
    pub interaction_window: u64,
    /// Trailing window for interaction counts (direct scan, kept small for speed)
    pub scan_interaction_window: u64,
    pub interaction_chunk_size: u64,
}

impl ScannerConfig {
    /// Build from `BASE_RPC_URL`, `ETHERSCAN_API_KEY`, `ETHERSCAN_API_URL` and `CHAIN_ID`
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let etherscan_api_key = std::env::var("ETHERSCAN_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let chain_id = std::env::var("CHAIN_ID")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.chain_id);

        Self {
            rpc_url: std::env::var("BASE_RPC_URL").unwrap_or(defaults.rpc_url),
            etherscan_api_url: std::env::var("ETHERSCAN_API_URL")
                .unwrap_or(defaults.etherscan_api_url),
            etherscan_api_key,
            chain_id,
            ..Self::default()
        }
    }

    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    pub fn with_etherscan_key(mut self, key: Option<String>) -> Self {
        self.etherscan_api_key = key.filter(|k| !k.trim().is_empty());
        self
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            etherscan_api_key: None,
            etherscan_api_url: DEFAULT_ETHERSCAN_API_URL.to_string(),
            chain_id: BASE_CHAIN_ID,
            index_timeout: Duration::from_secs(10),
            index_page_size: 1_000,
            indexed_cap: 20,
            direct_scan_cap: 20,
            direct_scan_window: 10_000,
            initial_chunk_size: 1_000,
            min_chunk_size: 100,
            max_chunk_size: 5_000,
            log_result_limit: 10_000,
            interaction_window: 5_000,
            scan_interaction_window: 2_000,
            interaction_chunk_size: 1_000,
        }
    }
}
