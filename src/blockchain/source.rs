//! Data-source seams used by discovery
//!
//! Strategies only see these traits; the caller decides which concrete
//! clients back them and owns their lifecycle.

use async_trait::async_trait;
use ethers::types::{Address, Bytes, Log, Transaction, TransactionReceipt, H256};
use serde::{Deserialize, Serialize};
use crate::utils::Result;

/// Read access to a chain node
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// Current chain height
    async fn block_number(&self) -> Result<u64>;

    /// Logs in `[from, to]`, optionally restricted to one emitter.
    ///
    /// Must fail with `ScoutError::TooManyResults` when the range exceeds the
    /// provider's per-call result limit.
    async fn get_logs(&self, from: u64, to: u64, address: Option<Address>) -> Result<Vec<Log>>;

    async fn get_transaction(&self, hash: H256) -> Result<Option<Transaction>>;

    async fn get_receipt(&self, hash: H256) -> Result<Option<TransactionReceipt>>;

    /// Deployed code, empty when the address has none
    async fn get_code(&self, address: Address) -> Result<Bytes>;

    /// Block timestamp in epoch seconds
    async fn block_timestamp(&self, number: u64) -> Result<Option<u64>>;
}

/// A transaction as reported by an account-history index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedTransaction {
    pub hash: H256,
    pub from: Address,
    /// `None` for contract creations
    pub to: Option<Address>,
    pub block_number: u64,
    pub timestamp: u64,
}

impl IndexedTransaction {
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }
}

/// Account transaction history (newest first)
#[async_trait]
pub trait TransactionIndex: Send + Sync {
    /// False when no credential is configured; callers skip the index entirely
    fn is_configured(&self) -> bool;

    async fn transactions(&self, address: Address, end_block: u64, limit: usize) -> Result<Vec<IndexedTransaction>>;
}

/// Source-code verification lookup
#[async_trait]
pub trait VerificationRegistry: Send + Sync {
    /// Never fails: unknown, unconfigured or unreachable all mean unverified
    async fn is_verified(&self, contract: Address) -> bool;
}
