pub mod contract;
pub mod scoring;
pub mod analysis;

pub use contract::{ContractRecord, DiscoverySource};
pub use scoring::{Label, ScoringResult};
pub use analysis::{ContractAnalysis, LabelSummary, WalletAnalysis};
