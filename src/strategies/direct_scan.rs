//! Direct-scan discovery: walk recent blocks through the node's log index
//!
//! Only creation transactions that emitted at least one log are visible here.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use ethers::types::{Address, Log, H256};
use crate::blockchain::{ChainSource, VerificationRegistry};
use crate::core::DiscoveryStrategy;
use crate::models::{ContractRecord, DiscoverySource};
use crate::strategies::ContractEnricher;
use crate::utils::{Result, ScannerConfig, ScoutError};

/// Block-range size that follows the provider's result limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptiveChunk {
    size: u64,
    min: u64,
    max: u64,
    result_limit: usize,
}

impl AdaptiveChunk {
    pub fn new(initial: u64, min: u64, max: u64, result_limit: usize) -> Self {
        let min = min.max(1);
        let max = max.max(min);
        Self {
            size: initial.clamp(min, max),
            min,
            max,
            result_limit,
        }
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Double after a chunk that came back under half the limit
    pub fn observe(&mut self, returned: usize) {
        if returned < self.result_limit / 2 {
            self.size = self.size.saturating_mul(2).min(self.max);
        }
    }

    /// Halve after a rejection. Returns false when already at the floor.
    pub fn shrink(&mut self) -> bool {
        if self.size <= self.min {
            return false;
        }
        self.size = (self.size / 2).max(self.min);
        true
    }
}

/// Distinct transaction ids in first-seen order
fn distinct_transactions(logs: &[Log]) -> Vec<H256> {
    let mut seen = HashSet::new();
    logs.iter()
        .filter_map(|log| log.transaction_hash)
        .filter(|hash| seen.insert(*hash))
        .collect()
}

pub struct DirectScanStrategy {
    chain: Arc<dyn ChainSource>,
    enricher: ContractEnricher,
    cap: usize,
    window: u64,
    chunk: AdaptiveChunk,
}

impl DirectScanStrategy {
    pub fn new(
        chain: Arc<dyn ChainSource>,
        registry: Arc<dyn VerificationRegistry>,
        config: &ScannerConfig,
    ) -> Self {
        Self {
            enricher: ContractEnricher::new(
                chain.clone(),
                registry,
                config.scan_interaction_window,
                config.interaction_chunk_size,
            ),
            chain,
            cap: config.direct_scan_cap,
            window: config.direct_scan_window,
            chunk: AdaptiveChunk::new(
                config.initial_chunk_size,
                config.min_chunk_size,
                config.max_chunk_size,
                config.log_result_limit,
            ),
        }
    }

    /// `Ok(None)` when the transaction is not a creation by `deployer`
    async fn inspect_transaction(&self, deployer: Address, hash: H256, head: u64) -> Result<Option<ContractRecord>> {
        let tx = self
            .chain
            .get_transaction(hash)
            .await?
            .ok_or_else(|| ScoutError::PartialScan(format!("Transaction {:?} not found", hash)))?;

        if tx.from != deployer || tx.to.is_some() {
            return Ok(None);
        }

        let receipt = self
            .chain
            .get_receipt(hash)
            .await?
            .ok_or_else(|| ScoutError::PartialScan(format!("Receipt for {:?} not found", hash)))?;

        let record = self.enricher.enrich(&receipt, None, head, self.source()).await?;
        Ok(Some(record))
    }
}

#[async_trait]
impl DiscoveryStrategy for DirectScanStrategy {
    fn name(&self) -> &'static str {
        "direct-scan"
    }

    fn source(&self) -> DiscoverySource {
        DiscoverySource::DirectScan
    }

    fn cap(&self) -> usize {
        self.cap
    }

    async fn discover(&self, deployer: Address) -> Result<Vec<ContractRecord>> {
        let head = match self.chain.block_number().await {
            Ok(head) => head,
            Err(e) => {
                tracing::warn!("Could not read chain height: {}", e);
                return Ok(Vec::new());
            }
        };

        let start = head.saturating_sub(self.window);
        let mut chunk = self.chunk;
        let mut records = Vec::new();
        let mut seen = HashSet::new();
        let mut from = start;

        tracing::info!("Scanning blocks {}..={} for creations by {:?}", start, head, deployer);

        while from <= head && records.len() < self.cap {
            let to = from.saturating_add(chunk.size() - 1).min(head);

            let logs = match self.chain.get_logs(from, to, None).await {
                Ok(logs) => logs,
                Err(e) if e.is_too_many_results() => {
                    if chunk.shrink() {
                        tracing::debug!("Range {}..={} too large, retrying with {} blocks", from, to, chunk.size());
                        continue;
                    }
                    tracing::warn!("Range {}..={} exceeds the result limit at minimum chunk size, skipping", from, to);
                    from = to + 1;
                    continue;
                }
                Err(e) => {
                    tracing::warn!("Failed to query range {}..={}: {}", from, to, e);
                    from = to + 1;
                    continue;
                }
            };

            chunk.observe(logs.len());

            let hashes = distinct_transactions(&logs);
            tracing::debug!("Range {}..={}: {} logs, {} transactions", from, to, logs.len(), hashes.len());

            for hash in hashes {
                if records.len() >= self.cap {
                    break;
                }

                match self.inspect_transaction(deployer, hash, head).await {
                    Ok(Some(record)) => {
                        if seen.insert(record.address) {
                            tracing::info!("Found contract {:?} at block {}", record.address, record.block_number);
                            records.push(record);
                        }
                    }
                    Ok(None) => {}
                    Err(e) => tracing::debug!("Skipping transaction {:?}: {}", hash, e),
                }
            }

            from = to + 1;
        }

        Ok(records)
    }
}
