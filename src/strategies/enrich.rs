use std::sync::Arc;
use ethers::types::{Address, TransactionReceipt};
use crate::analyzers::is_proxy_bytecode;
use crate::blockchain::{ChainSource, VerificationRegistry};
use crate::models::{ContractRecord, DiscoverySource};
use crate::utils::{Result, ScoutError};

/// Turns a creation receipt into a full [`ContractRecord`]
pub struct ContractEnricher {
    chain: Arc<dyn ChainSource>,
    registry: Arc<dyn VerificationRegistry>,
    interaction_window: u64,
    interaction_chunk_size: u64,
}

impl ContractEnricher {
    pub fn new(
        chain: Arc<dyn ChainSource>,
        registry: Arc<dyn VerificationRegistry>,
        interaction_window: u64,
        interaction_chunk_size: u64,
    ) -> Self {
        Self {
            chain,
            registry,
            interaction_window,
            interaction_chunk_size: interaction_chunk_size.max(1),
        }
    }

    /// Fetch code, verification, interaction count and (if not supplied) the
    /// block timestamp. The receipt must already be known since every other
    /// lookup needs the created address.
    pub async fn enrich(
        &self,
        receipt: &TransactionReceipt,
        timestamp: Option<u64>,
        head: u64,
        source: DiscoverySource,
    ) -> Result<ContractRecord> {
        let address = receipt.contract_address.ok_or_else(|| {
            ScoutError::PartialScan(format!("Receipt {:?} created no contract", receipt.transaction_hash))
        })?;
        let block_number = receipt.block_number.map(|n| n.as_u64()).unwrap_or_default();

        let timestamp_lookup = async {
            match timestamp {
                Some(ts) => Ok(Some(ts)),
                None => self.chain.block_timestamp(block_number).await,
            }
        };

        let (code, is_verified, interaction_count, timestamp) = tokio::join!(
            self.chain.get_code(address),
            self.registry.is_verified(address),
            self.interaction_count(address, head),
            timestamp_lookup,
        );

        let code = code?;
        let deployment_timestamp = timestamp?.ok_or_else(|| {
            ScoutError::PartialScan(format!("Block {} not found", block_number))
        })?;

        let mut record = ContractRecord::new(address, receipt.transaction_hash, source).with_bytecode(code);
        record.is_proxy = is_proxy_bytecode(&record.bytecode_hex());
        record.is_verified = is_verified;
        record.interaction_count = interaction_count;
        record.event_count = receipt.logs.len() as u64;
        record.block_number = block_number;
        record.deployment_timestamp = deployment_timestamp;

        tracing::debug!(
            "Enriched {:?}: {} bytes, proxy {}, verified {}, {} interactions",
            address,
            record.bytecode_size_bytes,
            record.is_proxy,
            record.is_verified,
            record.interaction_count
        );

        Ok(record)
    }

    /// Logs emitted by `address` over the trailing window ending at `head`.
    /// Failed chunks count as zero.
    pub async fn interaction_count(&self, address: Address, head: u64) -> u64 {
        let start = head.saturating_sub(self.interaction_window);
        let mut total = 0u64;
        let mut from = start;

        while from <= head {
            let to = from.saturating_add(self.interaction_chunk_size - 1).min(head);

            match self.chain.get_logs(from, to, Some(address)).await {
                Ok(logs) => total += logs.len() as u64,
                Err(e) => {
                    tracing::debug!("Interaction query {}..={} for {:?} failed: {}", from, to, address, e);
                }
            }

            from = to + 1;
        }

        total
    }
}
