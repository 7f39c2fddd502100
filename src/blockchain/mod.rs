pub mod source;
pub mod client;
pub mod etherscan;

pub use source::{ChainSource, IndexedTransaction, TransactionIndex, VerificationRegistry};
pub use client::BlockchainClient;
pub use etherscan::EtherscanClient;
