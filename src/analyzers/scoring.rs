use std::collections::HashMap;
use ethers::types::Address;
use crate::models::{ContractRecord, Label, ScoringResult};
use super::activity::{analyze_contract_activity, analyze_deployment_pattern, detect_mass_deployment, HIGH_DEPLOYMENT_RATE};
use super::bytecode::{analyze_bytecode_pattern, detect_bytecode_repetition, is_similar_bytecode};

/// Size (true bytes) above which code counts as substantial.
///
/// 499 bytes is 1000 hex characters once the `0x` prefix is included.
pub const SUBSTANTIAL_BYTECODE_BYTES: usize = 499;

/// Running total plus the evidence trail for one scoring pass
struct Tally {
    score: i64,
    reasons: Vec<String>,
}

impl Tally {
    fn new() -> Self {
        Self {
            score: 0,
            reasons: Vec::new(),
        }
    }

    fn apply(&mut self, delta: i64, reason: impl std::fmt::Display) {
        self.score += delta;
        self.reasons.push(format!("{:+}: {}", delta, reason));
    }
}

/// Rule-based scorer for single contracts and whole wallets.
///
/// Stateless: every call re-derives the analyzer outputs from its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    /// Score one contract in the context of every contract from the same deployer
    pub fn score_contract(&self, contract: &ContractRecord, all_contracts: &[ContractRecord]) -> ScoringResult {
        let repeated = detect_bytecode_repetition(all_contracts);
        self.score_with_repetition(contract, all_contracts, &repeated)
    }

    /// Fold per-contract scores and deployment-pattern signals into a wallet verdict
    pub fn score_wallet(&self, contracts: &[ContractRecord]) -> ScoringResult {
        if contracts.is_empty() {
            return ScoringResult::new(0, Label::Neutral).with_reason("No contracts deployed");
        }

        let repeated = detect_bytecode_repetition(contracts);
        let contract_total: i64 = contracts
            .iter()
            .map(|c| self.score_with_repetition(c, contracts, &repeated).score)
            .sum();

        let average = contract_total as f64 / contracts.len() as f64;

        let mut tally = Tally::new();
        tally.score = contract_total;

        let pattern = analyze_deployment_pattern(contracts);

        if pattern.burst_deployments {
            tally.apply(-20, "Burst deployment pattern detected");
        }

        if pattern.deployments_per_hour > HIGH_DEPLOYMENT_RATE {
            tally.apply(
                -15,
                format!("High deployment frequency ({:.1}/hour)", pattern.deployments_per_hour),
            );
        }

        // Overlaps with the two checks above on purpose; the stacking is existing behavior
        if detect_mass_deployment(contracts) {
            tally.apply(-25, "Mass deployment pattern");
        }

        let count = contracts.len() as f64;

        let verified_ratio = contracts.iter().filter(|c| c.is_verified).count() as f64 / count;
        if verified_ratio > 0.7 {
            tally.apply(20, "High verification ratio");
        } else if verified_ratio < 0.3 {
            tally.apply(-15, "Low verification ratio");
        }

        let active_ratio = contracts.iter().filter(|c| c.interaction_count > 0).count() as f64 / count;
        if active_ratio > 0.5 {
            tally.apply(15, "Good activity ratio");
        } else if active_ratio < 0.2 {
            tally.apply(-20, "Low activity ratio");
        }

        tracing::debug!(
            "Wallet score: total {} (contracts {}), average {:.2}",
            tally.score,
            contract_total,
            average
        );

        ScoringResult {
            score: tally.score,
            label: Label::from_wallet_scores(average, tally.score),
            reasons: tally.reasons,
        }
    }

    fn score_with_repetition(
        &self,
        contract: &ContractRecord,
        all_contracts: &[ContractRecord],
        repeated: &HashMap<String, Vec<Address>>,
    ) -> ScoringResult {
        let mut tally = Tally::new();
        let bytecode = contract.bytecode_hex();

        if contract.is_verified {
            tally.apply(15, "Contract verified");
        } else {
            tally.apply(-10, "Contract not verified");
        }

        let pattern = analyze_bytecode_pattern(&bytecode);

        if pattern.is_small {
            tally.apply(-15, format!("Small bytecode ({} bytes)", contract.bytecode_size_bytes));
        }

        if pattern.low_entropy {
            tally.apply(-10, format!("Low entropy bytecode ({:.2})", pattern.entropy));
        }

        if contract.bytecode_size_bytes > SUBSTANTIAL_BYTECODE_BYTES {
            tally.apply(5, "Substantial bytecode size");
        }

        if contract.is_proxy {
            tally.apply(10, "Proxy pattern detected");
        }

        if analyze_contract_activity(contract).has_real_activity {
            tally.apply(15, "Real activity detected");
        } else {
            tally.apply(-10, "No significant activity");
        }

        if contract.interaction_count == 0 {
            tally.apply(-15, "Zero interactions");
        } else if contract.interaction_count > 10 {
            tally.apply(10, "Multiple interactions");
        }

        if contract.event_count == 0 {
            tally.apply(-10, "No events emitted");
        } else if contract.event_count > 5 {
            tally.apply(5, "Events emitted");
        }

        let normalized = bytecode.to_ascii_lowercase();
        if let Some(addresses) = repeated.get(&normalized) {
            if addresses.contains(&contract.address) {
                tally.apply(-15, format!("Bytecode repeated {} times", addresses.len()));
            }
        }

        let similar = all_contracts
            .iter()
            .filter(|other| other.address != contract.address)
            .filter(|other| is_similar_bytecode(&other.bytecode_hex(), &bytecode))
            .count();

        if similar > 0 {
            tally.apply(-10, format!("Similar bytecode to {} other contract(s)", similar));
        }

        ScoringResult {
            score: tally.score,
            label: Label::from_contract_score(tally.score),
            reasons: tally.reasons,
        }
    }
}
