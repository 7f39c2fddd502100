pub mod errors;
pub mod address;
pub mod config;

pub use errors::{ScoutError, Result};
pub use address::parse_address;
pub use config::ScannerConfig;
