use std::collections::HashSet;
use std::sync::Arc;
use ethers::types::Address;
use crate::blockchain::{ChainSource, TransactionIndex, VerificationRegistry};
use crate::core::DiscoveryStrategy;
use crate::models::ContractRecord;
use crate::strategies::{DirectScanStrategy, IndexedApiStrategy};
use crate::utils::{parse_address, Result, ScannerConfig};

/// Ordered chain of discovery strategies. The first non-empty result wins;
/// results are never merged across strategies.
pub struct ContractDiscovery {
    strategies: Vec<Arc<dyn DiscoveryStrategy>>,
}

impl ContractDiscovery {
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Indexed API first, direct block scan as the fallback
    pub fn with_default_strategies(
        config: &ScannerConfig,
        chain: Arc<dyn ChainSource>,
        index: Arc<dyn TransactionIndex>,
        registry: Arc<dyn VerificationRegistry>,
    ) -> Self {
        Self::new()
            .add_strategy(Arc::new(IndexedApiStrategy::new(
                chain.clone(),
                index,
                registry.clone(),
                config,
            )))
            .add_strategy(Arc::new(DirectScanStrategy::new(chain, registry, config)))
    }

    pub fn add_strategy(mut self, strategy: Arc<dyn DiscoveryStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Validate `address`, then run the strategy chain.
    ///
    /// Only a malformed address is an error; every later failure degrades to
    /// fewer (possibly zero) records.
    pub async fn discover(&self, address: &str) -> Result<Vec<ContractRecord>> {
        let deployer = parse_address(address)?;
        Ok(self.discover_address(deployer).await)
    }

    pub async fn discover_address(&self, deployer: Address) -> Vec<ContractRecord> {
        for strategy in &self.strategies {
            if !strategy.is_available() {
                tracing::debug!("Strategy '{}' unavailable, skipping", strategy.name());
                continue;
            }

            tracing::info!("Discovering contracts for {:?} via '{}'", deployer, strategy.name());

            match strategy.discover(deployer).await {
                Ok(records) if !records.is_empty() => {
                    let records = dedupe_and_cap(records, strategy.cap());
                    tracing::info!("Strategy '{}' found {} contracts", strategy.name(), records.len());
                    return records;
                }
                Ok(_) => {
                    tracing::info!("Strategy '{}' found nothing, falling through", strategy.name());
                }
                Err(e) => {
                    tracing::warn!("Strategy '{}' failed: {}", strategy.name(), e);
                }
            }
        }

        tracing::info!("No contracts found for {:?}", deployer);
        Vec::new()
    }
}

impl Default for ContractDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep the first record per address, in order, up to `cap`
fn dedupe_and_cap(records: Vec<ContractRecord>, cap: usize) -> Vec<ContractRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.address))
        .take(cap)
        .collect()
}
