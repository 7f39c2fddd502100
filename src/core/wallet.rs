use ethers::types::Address;
use ethers::utils::to_checksum;
use crate::analyzers::ScoringEngine;
use crate::core::ContractDiscovery;
use crate::models::{ContractAnalysis, ContractRecord, LabelSummary, WalletAnalysis};
use crate::utils::{parse_address, Result};

/// Discovery plus scoring for one deployer address
pub struct WalletAnalyzer {
    discovery: ContractDiscovery,
    engine: ScoringEngine,
}

impl WalletAnalyzer {
    pub fn new(discovery: ContractDiscovery) -> Self {
        Self {
            discovery,
            engine: ScoringEngine::new(),
        }
    }

    pub async fn analyze(&self, address: &str) -> Result<WalletAnalysis> {
        let deployer = parse_address(address)?;
        let records = self.discovery.discover_address(deployer).await;
        Ok(self.score(deployer, records))
    }

    /// Score already-discovered records
    pub fn score(&self, deployer: Address, records: Vec<ContractRecord>) -> WalletAnalysis {
        let overall = self.engine.score_wallet(&records);

        let contracts: Vec<ContractAnalysis> = records
            .iter()
            .map(|record| ContractAnalysis {
                scoring: self.engine.score_contract(record, &records),
                record: record.clone(),
            })
            .collect();

        let summary = LabelSummary::from_contracts(&contracts);

        tracing::info!(
            "{:?}: {} contracts, wallet score {} ({})",
            deployer,
            summary.total_contracts,
            overall.score,
            overall.label
        );

        WalletAnalysis {
            address: to_checksum(&deployer, None),
            contracts,
            overall,
            summary,
        }
    }
}
