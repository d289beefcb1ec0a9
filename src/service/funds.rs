use async_trait::async_trait;
use tracing::{info, warn};

use crate::blockchain::tonapi::JettonBalance;
use crate::blockchain::{FundsSource, TonapiClient, ToncenterClient};
use crate::config::CheckerConfig;
use crate::core::domain::{
    FundsSnapshot, NftHolding, TokenHolding, NATIVE_DECIMALS, NATIVE_TOKEN_KEY,
};
use crate::core::errors::Result;
use crate::core::wallet::address::to_non_bounceable;
use crate::network::{FreeTierDelay, Pause, TokioSleep};

pub const UNKNOWN_SYMBOL: &str = "REALLY_UNKNOWN_SYMBOL";
pub const UNKNOWN_NAME: &str = "REALLY_UNKNOWN_NAME";

/// Merges node RPC and indexing API answers into one snapshot per wallet.
///
/// Calls are strictly sequential: NFT items, native balance, jetton balances,
/// with the free-tier delay in front of each indexing API request.
pub struct FundsResolver<P: Pause = TokioSleep> {
    toncenter: ToncenterClient,
    tonapi: TonapiClient,
    delay: FreeTierDelay<P>,
}

impl FundsResolver<TokioSleep> {
    pub fn from_config(config: &CheckerConfig) -> Result<Self> {
        let toncenter =
            ToncenterClient::new(config.toncenter_host.clone(), config.toncenter_api_key.clone());
        let tonapi = TonapiClient::new(config.tonapi_host.clone(), config.tonapi_key.as_deref())?;
        Ok(Self::new(toncenter, tonapi, FreeTierDelay::new(config.free_tier_delay)))
    }
}

impl<P: Pause> FundsResolver<P> {
    pub fn new(toncenter: ToncenterClient, tonapi: TonapiClient, delay: FreeTierDelay<P>) -> Self {
        Self { toncenter, tonapi, delay }
    }
}

fn jetton_holding(entry: JettonBalance, balance: u128) -> (String, TokenHolding) {
    let jetton = entry.jetton;
    let holding = TokenHolding {
        symbol: jetton.symbol.filter(|s| !s.is_empty()).unwrap_or_else(|| UNKNOWN_SYMBOL.into()),
        balance,
        decimals: jetton.decimals.unwrap_or(NATIVE_DECIMALS),
        name: jetton.name.filter(|s| !s.is_empty()).unwrap_or_else(|| UNKNOWN_NAME.into()),
        wallet_address: to_non_bounceable(&entry.wallet_address.address),
    };
    (to_non_bounceable(&jetton.address), holding)
}

#[async_trait]
impl<P: Pause> FundsSource for FundsResolver<P> {
    async fn resolve(&self, address: &str) -> Result<FundsSnapshot> {
        let mut snapshot = FundsSnapshot::new();

        self.delay.wait().await;
        for nft in self.tonapi.get_account_nfts(address).await? {
            let metadata = nft.metadata.unwrap_or_default();
            snapshot.insert_nft(to_non_bounceable(&nft.address), NftHolding { metadata });
        }

        let native = self.toncenter.get_address_balance(address).await?;
        snapshot.insert_token(NATIVE_TOKEN_KEY, TokenHolding::native(native));

        self.delay.wait().await;
        for entry in self.tonapi.get_jetton_balances(address).await? {
            match entry.amount() {
                Some(0) => continue,
                Some(balance) => {
                    let (key, holding) = jetton_holding(entry, balance);
                    snapshot.insert_token(key, holding);
                }
                None => warn!(
                    jetton = %entry.jetton.address,
                    raw = ?entry.balance,
                    "Skipping jetton with unparsable balance"
                ),
            }
        }

        info!(
            address,
            tokens = snapshot.tokens().count(),
            nfts = snapshot.nfts().count(),
            "Resolved wallet funds"
        );
        Ok(snapshot)
    }
}
