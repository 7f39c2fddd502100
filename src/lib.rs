pub mod core;
pub mod models;
pub mod analyzers;
pub mod blockchain;
pub mod strategies;
pub mod utils;

pub use core::{ContractDiscovery, DiscoveryStrategy, WalletAnalyzer};
pub use models::{ContractRecord, DiscoverySource, Label, ScoringResult, WalletAnalysis};
pub use analyzers::ScoringEngine;
pub use utils::{ScannerConfig, ScoutError, Result};
