use std::fmt;
use std::time::Duration;

use tracing::warn;

use crate::core::errors::{CheckerError, Result};
use crate::core::wallet::WalletVersion;

pub const DEFAULT_IGNORE_WALLET_VERSIONS: &str = "v2r1, v2r2, hv2";
pub const DEFAULT_SUPPORTED_WALLET_IDS: &str = "698983191, ";
pub const DEFAULT_TONAPI_HOST: &str = "https://tonapi.io";
pub const DEFAULT_TONCENTER_HOST: &str = "https://toncenter.com/api/v2";
pub const DEFAULT_FREE_TIER_DELAY_SECS: f64 = 4.0;

/// Process-wide settings, read once at start-up and passed into the pipeline.
#[derive(Clone, PartialEq)]
pub struct CheckerConfig {
    /// Versions skipped during derivation (IGNORE_WALLET_VERSIONS)
    pub ignore_wallet_versions: Vec<WalletVersion>,
    /// Wallet ids derived for each version (SUPPORTED_WALLET_IDS)
    pub wallet_ids: Vec<u32>,
    /// Bearer token for tonapi (TONAPI_KEY)
    pub tonapi_key: Option<String>,
    /// Indexing API base URL (TONAPI_HOST)
    pub tonapi_host: String,
    /// Node RPC base URL (TONCENTER_HOST)
    pub toncenter_host: String,
    /// `api_key` query parameter for toncenter (TONCENTER_API_KEY)
    pub toncenter_api_key: Option<String>,
    /// Pause before each indexing API call (FREE_TIER_DELAY)
    pub free_tier_delay: Duration,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            ignore_wallet_versions: parse_wallet_versions(DEFAULT_IGNORE_WALLET_VERSIONS),
            wallet_ids: parse_wallet_ids(DEFAULT_SUPPORTED_WALLET_IDS),
            tonapi_key: None,
            tonapi_host: DEFAULT_TONAPI_HOST.to_string(),
            toncenter_host: DEFAULT_TONCENTER_HOST.to_string(),
            toncenter_api_key: None,
            free_tier_delay: Duration::from_secs_f64(DEFAULT_FREE_TIER_DELAY_SECS),
        }
    }
}

impl CheckerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let ignore_wallet_versions = match lookup("IGNORE_WALLET_VERSIONS") {
            Some(raw) => parse_wallet_versions(&raw),
            None => defaults.ignore_wallet_versions,
        };
        let wallet_ids = match lookup("SUPPORTED_WALLET_IDS") {
            Some(raw) => parse_wallet_ids(&raw),
            None => defaults.wallet_ids,
        };
        let free_tier_delay = match lookup("FREE_TIER_DELAY") {
            Some(raw) => parse_delay(&raw)?,
            None => defaults.free_tier_delay,
        };

        Ok(Self {
            ignore_wallet_versions,
            wallet_ids,
            tonapi_key: non_empty(lookup("TONAPI_KEY")),
            tonapi_host: non_empty(lookup("TONAPI_HOST"))
                .map(trim_base_url)
                .unwrap_or(defaults.tonapi_host),
            toncenter_host: non_empty(lookup("TONCENTER_HOST"))
                .map(trim_base_url)
                .unwrap_or(defaults.toncenter_host),
            toncenter_api_key: non_empty(lookup("TONCENTER_API_KEY")),
            free_tier_delay,
        })
    }

    /// Versions that survive the exclusion list, in derivation order.
    pub fn active_wallet_versions(&self) -> Vec<WalletVersion> {
        WalletVersion::ALL
            .into_iter()
            .filter(|v| !self.ignore_wallet_versions.contains(v))
            .collect()
    }
}

// Credentials are never printed.
impl fmt::Debug for CheckerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("CheckerConfig")
            .field("ignore_wallet_versions", &self.ignore_wallet_versions)
            .field("wallet_ids", &self.wallet_ids)
            .field("tonapi_key", &redact(&self.tonapi_key))
            .field("tonapi_host", &self.tonapi_host)
            .field("toncenter_host", &self.toncenter_host)
            .field("toncenter_api_key", &redact(&self.toncenter_api_key))
            .field("free_tier_delay", &self.free_tier_delay)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn comma_separated(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_wallet_versions(raw: &str) -> Vec<WalletVersion> {
    comma_separated(raw)
        .filter_map(|tag| match tag.parse::<WalletVersion>() {
            Ok(version) => Some(version),
            Err(e) => {
                warn!("Skipping IGNORE_WALLET_VERSIONS entry: {}", e);
                None
            }
        })
        .collect()
}

fn parse_wallet_ids(raw: &str) -> Vec<u32> {
    comma_separated(raw)
        .filter_map(|id| match id.parse::<u32>() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("Skipping SUPPORTED_WALLET_IDS entry {:?}: not an unsigned integer", id);
                None
            }
        })
        .collect()
}

fn parse_delay(raw: &str) -> Result<Duration> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CheckerError::Config(format!("FREE_TIER_DELAY is not a number: {raw:?}")))?;
    Duration::try_from_secs_f64(secs)
        .map_err(|_| CheckerError::Config(format!("FREE_TIER_DELAY out of range: {raw:?}")))
}
