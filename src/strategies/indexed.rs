//! Indexed-API discovery: ask an account-history service for creation transactions

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use ethers::types::Address;
use crate::blockchain::{ChainSource, TransactionIndex, VerificationRegistry};
use crate::core::DiscoveryStrategy;
use crate::models::{ContractRecord, DiscoverySource};
use crate::strategies::ContractEnricher;
use crate::utils::{Result, ScannerConfig, ScoutError};

pub struct IndexedApiStrategy {
    chain: Arc<dyn ChainSource>,
    index: Arc<dyn TransactionIndex>,
    enricher: ContractEnricher,
    cap: usize,
    page_size: usize,
    timeout: Duration,
}

impl IndexedApiStrategy {
    pub fn new(
        chain: Arc<dyn ChainSource>,
        index: Arc<dyn TransactionIndex>,
        registry: Arc<dyn VerificationRegistry>,
        config: &ScannerConfig,
    ) -> Self {
        Self {
            enricher: ContractEnricher::new(
                chain.clone(),
                registry,
                config.interaction_window,
                config.interaction_chunk_size,
            ),
            chain,
            index,
            cap: config.indexed_cap,
            page_size: config.index_page_size,
            timeout: config.index_timeout,
        }
    }
}

#[async_trait]
impl DiscoveryStrategy for IndexedApiStrategy {
    fn name(&self) -> &'static str {
        "indexed-api"
    }

    fn source(&self) -> DiscoverySource {
        DiscoverySource::IndexedApi
    }

    fn cap(&self) -> usize {
        self.cap
    }

    fn is_available(&self) -> bool {
        self.index.is_configured()
    }

    async fn discover(&self, deployer: Address) -> Result<Vec<ContractRecord>> {
        let head = self.chain.block_number().await?;

        let history = tokio::time::timeout(
            self.timeout,
            self.index.transactions(deployer, head, self.page_size),
        )
        .await
        .map_err(|_| ScoutError::SourceUnavailable(format!(
            "Transaction index timed out after {:?}",
            self.timeout
        )))??;

        let creations: Vec<_> = history
            .into_iter()
            .filter(|tx| tx.from == deployer && tx.is_contract_creation())
            .take(self.cap)
            .collect();

        tracing::info!("Index reports {} contract creations (newest first)", creations.len());

        let mut records = Vec::with_capacity(creations.len());
        let mut seen = HashSet::new();

        for tx in creations {
            let receipt = match self.chain.get_receipt(tx.hash).await {
                Ok(Some(receipt)) => receipt,
                Ok(None) => {
                    tracing::warn!("No receipt for creation tx {:?}", tx.hash);
                    continue;
                }
                Err(e) => {
                    tracing::warn!("Receipt lookup for {:?} failed: {}", tx.hash, e);
                    continue;
                }
            };

            match self.enricher.enrich(&receipt, Some(tx.timestamp), head, self.source()).await {
                Ok(record) => {
                    if seen.insert(record.address) {
                        records.push(record);
                    }
                }
                Err(e) => tracing::warn!("Skipping creation tx {:?}: {}", tx.hash, e),
            }
        }

        Ok(records)
    }
}
