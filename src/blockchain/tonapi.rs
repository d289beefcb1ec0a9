//! tonapi.io indexing API client (v2 REST).
//!
//! Provides per-account NFT and jetton listings.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::errors::{CheckerError, Result};

/// Identifies unauthenticated requests to tonapi.
pub const ANONYMOUS_USER_AGENT: &str = "ton_mnemonic_checker";

const NFT_PAGE_LIMIT: &str = "1000";

pub struct TonapiClient {
    base_url: String,
    client: reqwest::Client,
}

/// `GET /v2/accounts/{id}/nfts` body.
#[derive(Debug, Deserialize)]
pub struct NftItemsResponse {
    #[serde(default)]
    pub nft_items: Vec<NftItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NftItem {
    /// Raw `workchain:hex` address.
    pub address: String,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

/// `GET /v2/accounts/{id}/jettons` body.
#[derive(Debug, Deserialize)]
pub struct JettonBalancesResponse {
    #[serde(default)]
    pub balances: Vec<JettonBalance>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JettonBalance {
    /// Minor units as a decimal string.
    #[serde(default)]
    pub balance: Option<String>,
    pub wallet_address: AccountAddress,
    pub jetton: JettonPreview,
}

impl JettonBalance {
    /// Parsed balance; a missing or empty value counts as zero.
    pub fn amount(&self) -> Option<u128> {
        match self.balance.as_deref().map(str::trim) {
            None | Some("") => Some(0),
            Some(raw) => raw.parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountAddress {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JettonPreview {
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub decimals: Option<u32>,
}

impl TonapiClient {
    /// # Arguments
    /// * `base_url` - API root, e.g. `https://tonapi.io`
    /// * `api_key` - bearer token; without one requests carry a client user agent
    pub fn new(base_url: impl Into<String>, api_key: Option<&str>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        match api_key {
            Some(key) => {
                let mut headers = HeaderMap::new();
                let mut value = HeaderValue::from_str(&format!("Bearer {key}"))
                    .map_err(|e| CheckerError::Config(format!("invalid TONAPI_KEY: {e}")))?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
                builder = builder.default_headers(headers);
            }
            None => builder = builder.user_agent(ANONYMOUS_USER_AGENT),
        }

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// NFT items directly owned by `account`.
    pub async fn get_account_nfts(&self, account: &str) -> Result<Vec<NftItem>> {
        let url = format!("{}/v2/accounts/{}/nfts", self.base_url, account);
        let query = [("limit", NFT_PAGE_LIMIT), ("offset", "0"), ("indirect_ownership", "false")];
        let response: NftItemsResponse = self.get_json(&url, &query).await?;
        debug!(account, count = response.nft_items.len(), "tonapi nft items");
        Ok(response.nft_items)
    }

    /// Jetton balances of `account`, including zero balances.
    pub async fn get_jetton_balances(&self, account: &str) -> Result<Vec<JettonBalance>> {
        let url = format!("{}/v2/accounts/{}/jettons", self.base_url, account);
        let response: JettonBalancesResponse = self.get_json(&url, &[]).await?;
        debug!(account, count = response.balances.len(), "tonapi jetton balances");
        Ok(response.balances)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        let body = self
            .client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        serde_json::from_str(&body).map_err(|e| CheckerError::UnexpectedResponse {
            service: "tonapi",
            reason: e.to_string(),
        })
    }
}
