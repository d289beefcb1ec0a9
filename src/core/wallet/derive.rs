//! Wallet derivation from a recovery phrase.
//!
//! Key material follows the TON mnemonic scheme:
//! `entropy = HMAC-SHA512(phrase, "")`,
//! `seed = PBKDF2-HMAC-SHA512(entropy, "TON default seed", 100000)`,
//! and the first 32 bytes of `seed` are the Ed25519 secret.
//! Wallet contract code and state-init hashing come from `tonlib-core`.

use std::sync::Arc;

use ed25519_dalek::SigningKey;
use hmac::{Hmac, Mac};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use tonlib_core::cell::{CellBuilder, StateInit, TonCellError};
use tonlib_core::mnemonic::KeyPair;
use tonlib_core::wallet::{TonWallet, WalletVersion as SdkWalletVersion};
use tonlib_core::TonAddress;
use tracing::debug;
use zeroize::Zeroizing;

use super::{WalletCandidate, WalletVersion};
use crate::core::errors::{CheckerError, Result};
use crate::core::mnemonic::Mnemonic;

type HmacSha512 = Hmac<Sha512>;

const SEED_SALT: &[u8] = b"TON default seed";
const SEED_ITERATIONS: u32 = 100_000;

/// Produces a wallet address for a (mnemonic, version, wallet id) target.
///
/// Implementations must be deterministic and must not touch the network.
pub trait WalletDeriver {
    fn derive(&self, mnemonic: &Mnemonic, version: WalletVersion, wallet_id: u32)
        -> Result<String>;
}

/// Derives addresses with the TON SDK on the basechain.
#[derive(Debug, Clone, Default)]
pub struct TonSdkDeriver {
    workchain: i32,
}

impl TonSdkDeriver {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sdk_version(version: WalletVersion) -> SdkWalletVersion {
    match version {
        WalletVersion::V2R1 => SdkWalletVersion::V2R1,
        WalletVersion::V2R2 => SdkWalletVersion::V2R2,
        WalletVersion::V3R1 => SdkWalletVersion::V3R1,
        WalletVersion::V3R2 => SdkWalletVersion::V3R2,
        WalletVersion::V4R2 => SdkWalletVersion::V4R2,
        WalletVersion::HighloadV2 => SdkWalletVersion::HighloadV2,
    }
}

/// Address of a highload v2 wallet.
///
/// The SDK ships the contract code but builds no initial data for it.
/// Data layout: `wallet_id:u32 last_cleaned:u64 public_key:bits256`
/// followed by an empty `old_queries` dictionary.
fn highload_v2_address(
    workchain: i32,
    public_key: &[u8],
    wallet_id: u32,
) -> std::result::Result<TonAddress, TonCellError> {
    let data = CellBuilder::new()
        .store_u32(32, wallet_id)?
        .store_u64(64, 0)?
        .store_slice(public_key)?
        .store_bit(false)?
        .build()?;
    let version = SdkWalletVersion::HighloadV2;
    let account_id = StateInit::create_account_id(version.code()?, &Arc::new(data))?;
    Ok(TonAddress::new(workchain, &account_id))
}

/// Ed25519 key pair for a recovery phrase, without a password.
pub fn derive_key_pair(mnemonic: &Mnemonic) -> Result<KeyPair> {
    let phrase = Zeroizing::new(mnemonic.phrase());
    let mut mac = <HmacSha512 as Mac>::new_from_slice(phrase.as_bytes())
        .map_err(|e| CheckerError::Config(format!("hmac key rejected: {e}")))?;
    mac.update(b"");
    let entropy = Zeroizing::new(mac.finalize().into_bytes().to_vec());

    let mut seed = Zeroizing::new([0u8; 64]);
    pbkdf2_hmac::<Sha512>(&entropy, SEED_SALT, SEED_ITERATIONS, seed.as_mut_slice());

    let mut secret = Zeroizing::new([0u8; 32]);
    secret.copy_from_slice(&seed[..32]);
    let signing_key = SigningKey::from_bytes(&secret);
    let public_key = signing_key.verifying_key().to_bytes();

    let mut secret_key = Vec::with_capacity(64);
    secret_key.extend_from_slice(secret.as_slice());
    secret_key.extend_from_slice(&public_key);

    Ok(KeyPair { public_key: public_key.to_vec(), secret_key })
}

impl WalletDeriver for TonSdkDeriver {
    fn derive(
        &self,
        mnemonic: &Mnemonic,
        version: WalletVersion,
        wallet_id: u32,
    ) -> Result<String> {
        let key_pair = derive_key_pair(mnemonic)?;
        let address = match version {
            WalletVersion::HighloadV2 => {
                highload_v2_address(self.workchain, &key_pair.public_key, wallet_id)
            }
            _ => {
                // the SDK stores the id with store_i32(32, ..); the cast keeps the same 32 bits
                let sdk_wallet_id = wallet_id as i32;
                TonWallet::derive(self.workchain, sdk_version(version), &key_pair, sdk_wallet_id)
                    .map(|wallet| wallet.address)
            }
        }
        .map_err(|e| CheckerError::Derivation { version, wallet_id, reason: e.to_string() })?
        .to_base64_url();

        debug!(%version, wallet_id, %address, "derived wallet");
        Ok(address)
    }
}

/// Every (version, id) target not excluded, in version-then-id order.
pub fn derive_candidates<D>(
    deriver: &D,
    mnemonic: &Mnemonic,
    ignored: &[WalletVersion],
    wallet_ids: &[u32],
) -> Result<Vec<WalletCandidate>>
where
    D: WalletDeriver + ?Sized,
{
    let mut candidates = Vec::new();
    for version in WalletVersion::ALL.into_iter().filter(|v| !ignored.contains(v)) {
        for &wallet_id in wallet_ids {
            let address = deriver.derive(mnemonic, version, wallet_id)?;
            candidates.push(WalletCandidate { version, wallet_id, address });
        }
    }
    Ok(candidates)
}
