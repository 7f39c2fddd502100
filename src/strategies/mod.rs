//! Discovery strategies, tried in order by `ContractDiscovery`

mod enrich;
mod indexed;
mod direct_scan;

pub use enrich::ContractEnricher;
pub use indexed::IndexedApiStrategy;
pub use direct_scan::{AdaptiveChunk, DirectScanStrategy};
