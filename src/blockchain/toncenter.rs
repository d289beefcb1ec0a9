//! Toncenter node RPC client.
//!
//! Only the native balance lookup is needed. A malformed or error answer is
//! not fatal: the raw body is logged and the balance counts as zero.

use serde_json::Value;
use tracing::{debug, warn};

use crate::core::errors::Result;

pub struct ToncenterClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl ToncenterClient {
    /// # Arguments
    /// * `base_url` - API root, e.g. `https://toncenter.com/api/v2`
    /// * `api_key` - optional key sent as the `api_key` query parameter
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Native balance of `address` in nanoton.
    ///
    /// Transport failures propagate; anything the node answers that is not a
    /// `result` integer degrades to 0.
    pub async fn get_address_balance(&self, address: &str) -> Result<u128> {
        let url = format!("{}/getAddressBalance", self.base_url);
        let mut query: Vec<(&str, &str)> = Vec::with_capacity(2);
        if let Some(key) = &self.api_key {
            query.push(("api_key", key.as_str()));
        }
        query.push(("address", address));

        let response = self.client.get(&url).query(&query).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, address, "toncenter getAddressBalance answered");

        match parse_balance(&body) {
            Some(balance) => Ok(balance),
            None => {
                warn!(%status, raw = %body, "Unexpected toncenter balance response, assuming 0");
                Ok(0)
            }
        }
    }
}

/// Extract the integer `result` of a `getAddressBalance` body.
///
/// Toncenter sends the balance as a decimal string; plain numbers are accepted too.
pub fn parse_balance(body: &str) -> Option<u128> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("result")? {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64().map(u128::from),
        _ => None,
    }
}
