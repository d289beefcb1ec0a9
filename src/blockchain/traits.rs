use async_trait::async_trait;

use crate::core::domain::FundsSnapshot;
use crate::core::errors::Result;

/// Looks up everything a wallet address holds.
#[async_trait]
pub trait FundsSource: Send + Sync {
    /// Retrieves native, jetton and NFT holdings of `address`.
    async fn resolve(&self, address: &str) -> Result<FundsSnapshot>;
}
