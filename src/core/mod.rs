pub mod traits;
pub mod discovery;
pub mod wallet;

pub use traits::DiscoveryStrategy;
pub use discovery::ContractDiscovery;
pub use wallet::WalletAnalyzer;
