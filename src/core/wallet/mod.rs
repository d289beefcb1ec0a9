// filepath: src/core/wallet/mod.rs
pub mod address;
pub mod derive;
pub mod version;

pub use derive::{derive_candidates, TonSdkDeriver, WalletDeriver};
pub use version::WalletVersion;

/// One derived wallet: the target it was built for and its bounceable address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletCandidate {
    pub version: WalletVersion,
    pub wallet_id: u32,
    pub address: String,
}
