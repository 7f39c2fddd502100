use async_trait::async_trait;
use ethers::types::Address;
use crate::models::{ContractRecord, DiscoverySource};
use crate::utils::Result;

/// One way of finding the contracts an address deployed
#[async_trait]
pub trait DiscoveryStrategy: Send + Sync {
    /// Unique identifier for this strategy
    fn name(&self) -> &'static str;

    /// Tag stamped on every record this strategy produces
    fn source(&self) -> DiscoverySource;

    /// Upper bound on records returned
    fn cap(&self) -> usize;

    /// Can this strategy run at all (credentials, configuration)?
    fn is_available(&self) -> bool {
        true
    }

    /// Find contracts created by `deployer`, in the source's own order.
    ///
    /// An error or an empty list both hand over to the next strategy.
    async fn discover(&self, deployer: Address) -> Result<Vec<ContractRecord>>;
}
