use super::contract::ContractRecord;
use super::scoring::{Label, ScoringResult};
use serde::{Deserialize, Serialize};

/// A discovered contract together with its score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractAnalysis {
    #[serde(flatten)]
    pub record: ContractRecord,
    pub scoring: ScoringResult,
}

/// Label counts across a wallet's contracts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSummary {
    pub total_contracts: usize,
    pub high_quality: usize,
    pub neutral: usize,
    pub airdrop_farming: usize,
}

impl LabelSummary {
    pub fn from_contracts(contracts: &[ContractAnalysis]) -> Self {
        let mut summary = Self {
            total_contracts: contracts.len(),
            ..Self::default()
        };

        for contract in contracts {
            match contract.scoring.label {
                Label::HighQuality => summary.high_quality += 1,
                Label::Neutral => summary.neutral += 1,
                Label::AirdropFarming => summary.airdrop_farming += 1,
            }
        }

        summary
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAnalysis {
    pub address: String,
    pub contracts: Vec<ContractAnalysis>,
    pub overall: ScoringResult,
    pub summary: LabelSummary,
}

impl std::fmt::Display for WalletAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        writeln!(f, "              DEPLOYER QUALITY REPORT")?;
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        writeln!(f)?;
        writeln!(f, "Address: {}", self.address)?;
        writeln!(f)?;
        writeln!(f, "═══ VERDICT ═══")?;
        writeln!(f, "{} {}", self.overall.label.emoji(), self.overall.label.as_str().to_uppercase())?;
        writeln!(f, "Wallet Score: {}", self.overall.score)?;

        for reason in &self.overall.reasons {
            writeln!(f, "  {}", reason)?;
        }

        writeln!(f)?;
        writeln!(f, "═══ SUMMARY ═══")?;
        writeln!(f, "Contracts:       {}", self.summary.total_contracts)?;
        writeln!(f, "High quality:    {}", self.summary.high_quality)?;
        writeln!(f, "Neutral:         {}", self.summary.neutral)?;
        writeln!(f, "Airdrop farming: {}", self.summary.airdrop_farming)?;

        if self.contracts.is_empty() {
            writeln!(f)?;
            writeln!(f, "No contracts found in the scanned window")?;
        }

        for contract in &self.contracts {
            let record = &contract.record;
            writeln!(f)?;
            writeln!(f, "═══ {:?} ═══", record.address)?;
            writeln!(
                f,
                "{} {} (score {}) via {}",
                contract.scoring.label.emoji(),
                contract.scoring.label,
                contract.scoring.score,
                record.source
            )?;
            writeln!(
                f,
                "Block {} | {} bytes | verified: {} | proxy: {} | interactions: {} | events: {}",
                record.block_number,
                record.bytecode_size_bytes,
                record.is_verified,
                record.is_proxy,
                record.interaction_count,
                record.event_count
            )?;
            for reason in &contract.scoring.reasons {
                writeln!(f, "  {}", reason)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "═══════════════════════════════════════════════════════════")?;

        Ok(())
    }
}
