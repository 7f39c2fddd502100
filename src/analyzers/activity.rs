//! Activity and deployment-pattern metrics derived from fetched records

use std::collections::HashMap;
use crate::models::ContractRecord;

/// Deployments within one 60-second bucket that count as a burst
pub const BURST_THRESHOLD: usize = 10;

/// Deployments per hour above which a wallet deploys at a farming pace
pub const HIGH_DEPLOYMENT_RATE: f64 = 5.0;

/// Minimum contract count for the mass-deployment check
pub const MASS_DEPLOYMENT_MIN_CONTRACTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityMetrics {
    pub has_real_activity: bool,
    /// Rough guess, one interactor per three logs
    pub unique_interactors: u64,
    pub has_admin_changes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeploymentPattern {
    pub burst_deployments: bool,
    pub max_deployments_per_minute: usize,
    pub deployments_per_hour: f64,
    pub deployments_per_day: f64,
}

impl Default for DeploymentPattern {
    fn default() -> Self {
        Self {
            burst_deployments: false,
            max_deployments_per_minute: 0,
            deployments_per_hour: 0.0,
            deployments_per_day: 0.0,
        }
    }
}

pub fn analyze_contract_activity(contract: &ContractRecord) -> ActivityMetrics {
    ActivityMetrics {
        has_real_activity: contract.interaction_count > 5 || contract.event_count > 10,
        unique_interactors: contract.interaction_count / 3,
        has_admin_changes: contract.event_count > 0 && contract.interaction_count > 0,
    }
}

/// Bucket deployments into 60-second windows and derive rates over the
/// first-to-last span. A zero span reports the raw count as the rate.
pub fn analyze_deployment_pattern(contracts: &[ContractRecord]) -> DeploymentPattern {
    if contracts.is_empty() {
        return DeploymentPattern::default();
    }

    let mut minute_windows: HashMap<u64, usize> = HashMap::new();
    for contract in contracts {
        *minute_windows.entry(contract.deployment_timestamp / 60).or_insert(0) += 1;
    }

    let max_deployments_per_minute = minute_windows.values().copied().max().unwrap_or(0);

    let first = contracts.iter().map(|c| c.deployment_timestamp).min().unwrap_or(0);
    let last = contracts.iter().map(|c| c.deployment_timestamp).max().unwrap_or(0);

    let total_hours = (last - first) as f64 / 3600.0;
    let total_days = total_hours / 24.0;
    let count = contracts.len() as f64;

    DeploymentPattern {
        burst_deployments: max_deployments_per_minute >= BURST_THRESHOLD,
        max_deployments_per_minute,
        deployments_per_hour: if total_hours > 0.0 { count / total_hours } else { count },
        deployments_per_day: if total_days > 0.0 { count / total_days } else { count },
    }
}

pub fn detect_mass_deployment(contracts: &[ContractRecord]) -> bool {
    if contracts.len() < MASS_DEPLOYMENT_MIN_CONTRACTS {
        return false;
    }

    let pattern = analyze_deployment_pattern(contracts);
    pattern.burst_deployments || pattern.deployments_per_hour > HIGH_DEPLOYMENT_RATE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiscoverySource;
    use ethers::types::{Address, H256};

    fn deployed_at(index: u8, timestamp: u64) -> ContractRecord {
        let mut record = ContractRecord::new(
            Address::repeat_byte(index),
            H256::repeat_byte(index),
            DiscoverySource::DirectScan,
        );
        record.deployment_timestamp = timestamp;
        record
    }

    #[test]
    fn test_real_activity() {
        let mut record = deployed_at(1, 0);
        assert!(!analyze_contract_activity(&record).has_real_activity);

        record.interaction_count = 6;
        let metrics = analyze_contract_activity(&record);
        assert!(metrics.has_real_activity);
        assert_eq!(metrics.unique_interactors, 2);
        assert!(!metrics.has_admin_changes);

        record.interaction_count = 0;
        record.event_count = 11;
        assert!(analyze_contract_activity(&record).has_real_activity);
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(analyze_deployment_pattern(&[]), DeploymentPattern::default());
        assert!(!detect_mass_deployment(&[]));
    }

    #[test]
    fn test_burst_in_one_minute() {
        // 12 deployments in the same 60-second bucket
        let contracts: Vec<_> = (0..12).map(|i| deployed_at(i, 1_700_000_040 + i as u64)).collect();
        let pattern = analyze_deployment_pattern(&contracts);

        assert!(pattern.burst_deployments);
        assert_eq!(pattern.max_deployments_per_minute, 12);
        assert!(detect_mass_deployment(&contracts));
    }

    #[test]
    fn test_zero_span_uses_raw_count() {
        let contracts: Vec<_> = (0..3).map(|i| deployed_at(i, 1_000)).collect();
        let pattern = analyze_deployment_pattern(&contracts);

        assert_eq!(pattern.deployments_per_hour, 3.0);
        assert_eq!(pattern.deployments_per_day, 3.0);
        assert!(!pattern.burst_deployments);
    }

    #[test]
    fn test_rates_over_span() {
        // 4 deployments spread over two hours
        let contracts: Vec<_> = (0..4).map(|i| deployed_at(i, i as u64 * 2_400)).collect();
        let pattern = analyze_deployment_pattern(&contracts);

        assert!((pattern.deployments_per_hour - 4.0 / 2.0).abs() < 1e-9);
        assert!((pattern.deployments_per_day - 4.0 / (2.0 / 24.0)).abs() < 1e-9);
    }

    #[test]
    fn test_slow_deployer_is_not_mass() {
        // One deployment per day for 12 days
        let contracts: Vec<_> = (0..12).map(|i| deployed_at(i, i as u64 * 86_400)).collect();
        assert!(!detect_mass_deployment(&contracts));
    }
}
