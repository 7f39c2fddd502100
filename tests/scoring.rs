use deployer_scout::analyzers::{analyze_deployment_pattern, calculate_entropy};
use deployer_scout::{ContractRecord, DiscoverySource, Label, ScoringEngine};
use ethers::types::{Address, Bytes, H256};

fn record(index: u64, code: Vec<u8>) -> ContractRecord {
    ContractRecord::new(
        Address::from_low_u64_be(index),
        H256::from_low_u64_be(index),
        DiscoverySource::DirectScan,
    )
    .with_bytecode(Bytes::from(code))
}

#[test]
fn test_unverified_inactive_stub_scores_minus_seventy() {
    // 150 bytes over the hex digits 0-3: entropy exactly 2 bits
    let code: Vec<u8> = (0..150).map(|i| if i % 2 == 0 { 0x01 } else { 0x23 }).collect();
    let contract = record(1, code);
    assert!((calculate_entropy(&contract.bytecode_hex()) - 2.0).abs() < 1e-9);

    let result = ScoringEngine::new().score_contract(&contract, std::slice::from_ref(&contract));

    assert_eq!(
        result.reasons,
        vec![
            "-10: Contract not verified",
            "-15: Small bytecode (150 bytes)",
            "-10: Low entropy bytecode (2.00)",
            "-10: No significant activity",
            "-15: Zero interactions",
            "-10: No events emitted",
        ]
    );
    assert_eq!(result.score, -70);
    assert_eq!(result.label, Label::AirdropFarming);
}

#[test]
fn test_twelve_deployments_in_one_minute() {
    let contracts: Vec<_> = (0..12u64)
        .map(|i| {
            let mut c = record(i + 1, vec![0x60, i as u8]);
            c.deployment_timestamp = 1_699_999_980 + i * 4;
            c
        })
        .collect();

    let pattern = analyze_deployment_pattern(&contracts);
    assert!(pattern.burst_deployments);

    let wallet = ScoringEngine::new().score_wallet(&contracts);
    assert_eq!(wallet.reasons[0], "-20: Burst deployment pattern detected");
    assert!(wallet.reasons.contains(&"-25: Mass deployment pattern".to_string()));
}

#[test]
fn test_wallet_label_uses_pre_adjustment_average() {
    // Three solid contracts; wallet bonuses lift the total but not the average
    let contracts: Vec<_> = (0..3u64)
        .map(|i| {
            let code: Vec<u8> = (0..300u32).map(|b| ((b * 11 + i as u32 * 37) % 223 + 16) as u8).collect();
            let mut c = record(i + 1, code);
            c.is_verified = true;
            c.interaction_count = 3;
            c.event_count = 2;
            c.deployment_timestamp = i * 86_400;
            c
        })
        .collect();

    let engine = ScoringEngine::new();
    let per_contract: Vec<_> = contracts.iter().map(|c| engine.score_contract(c, &contracts).score).collect();
    // +15 verified, -10 no significant activity
    assert!(per_contract.iter().all(|s| *s == 5));

    let wallet = engine.score_wallet(&contracts);
    assert_eq!(wallet.score, 15 + 20 + 15);
    // average 5 is below the high-quality bar even though the total clears 30
    assert_eq!(wallet.label, Label::Neutral);
}
