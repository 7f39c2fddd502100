use ethers::types::{Address, Bytes, H256};
use serde::{Deserialize, Serialize};

/// Which discovery strategy produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscoverySource {
    IndexedApi,
    DirectScan,
}

impl std::fmt::Display for DiscoverySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoverySource::IndexedApi => write!(f, "indexed-api"),
            DiscoverySource::DirectScan => write!(f, "direct-scan"),
        }
    }
}

/// One contract deployed by the target address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRecord {
    pub address: Address,
    pub creation_tx: H256,
    pub block_number: u64,
    /// Epoch seconds of the deployment block
    pub deployment_timestamp: u64,
    /// True byte count of the deployed code (no `0x` prefix, one per byte)
    pub bytecode_size_bytes: usize,
    pub is_proxy: bool,
    pub is_verified: bool,
    /// Logs emitted by the contract over a bounded trailing window
    pub interaction_count: u64,
    /// Logs in the creation receipt
    pub event_count: u64,
    pub bytecode: Bytes,
    pub source: DiscoverySource,
}

impl ContractRecord {
    pub fn new(address: Address, creation_tx: H256, source: DiscoverySource) -> Self {
        Self {
            address,
            creation_tx,
            block_number: 0,
            deployment_timestamp: 0,
            bytecode_size_bytes: 0,
            is_proxy: false,
            is_verified: false,
            interaction_count: 0,
            event_count: 0,
            bytecode: Bytes::default(),
            source,
        }
    }

    /// Set the deployed code and its derived size
    pub fn with_bytecode(mut self, bytecode: Bytes) -> Self {
        self.bytecode_size_bytes = bytecode.len();
        self.bytecode = bytecode;
        self
    }

    /// Deployed code as a `0x`-prefixed lowercase hex string (`"0x"` when empty)
    pub fn bytecode_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.bytecode))
    }
}
