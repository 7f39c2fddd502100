pub mod bytecode;
pub mod activity;
pub mod scoring;

pub use bytecode::{
    analyze_bytecode_pattern, calculate_entropy, detect_bytecode_repetition, is_proxy_bytecode,
    is_similar_bytecode, BytecodePattern,
};
pub use activity::{
    analyze_contract_activity, analyze_deployment_pattern, detect_mass_deployment, ActivityMetrics,
    DeploymentPattern,
};
pub use scoring::ScoringEngine;
