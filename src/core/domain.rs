use serde_json::{Map, Value};

/// Key the native coin balance is stored under in a [`FundsSnapshot`].
pub const NATIVE_TOKEN_KEY: &str = "0:0";

/// Native coin decimals (1 TON = 10^9 nanoton).
pub const NATIVE_DECIMALS: u32 = 9;

/// Decimal places used when rendering balances.
pub const DISPLAY_PLACES: u32 = 6;

/// A fungible balance held by a wallet, in minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenHolding {
    pub symbol: String,
    pub balance: u128,
    pub decimals: u32,
    pub name: String,
    /// Token-specific sub-wallet address; empty for the native coin.
    pub wallet_address: String,
}

impl TokenHolding {
    pub fn native(balance: u128) -> Self {
        Self {
            symbol: "TON".to_string(),
            balance,
            decimals: NATIVE_DECIMALS,
            name: "TON".to_string(),
            wallet_address: String::new(),
        }
    }

    pub fn display_amount(&self) -> String {
        format_units(self.balance, self.decimals)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NftHolding {
    pub metadata: Map<String, Value>,
}

/// Everything found for one wallet, keyed by token / item address.
///
/// Entries keep insertion order; inserting an existing key replaces the
/// value in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FundsSnapshot {
    tokens: Vec<(String, TokenHolding)>,
    nfts: Vec<(String, NftHolding)>,
}

impl FundsSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_token(&mut self, key: impl Into<String>, holding: TokenHolding) {
        upsert(&mut self.tokens, key.into(), holding);
    }

    pub fn insert_nft(&mut self, key: impl Into<String>, holding: NftHolding) {
        upsert(&mut self.nfts, key.into(), holding);
    }

    pub fn token(&self, key: &str) -> Option<&TokenHolding> {
        self.tokens.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn tokens(&self) -> impl Iterator<Item = (&str, &TokenHolding)> {
        self.tokens.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn nfts(&self) -> impl Iterator<Item = (&str, &NftHolding)> {
        self.nfts.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn native_balance(&self) -> Option<u128> {
        self.token(NATIVE_TOKEN_KEY).map(|h| h.balance)
    }
}

fn upsert<V>(entries: &mut Vec<(String, V)>, key: String, value: V) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => entries.push((key, value)),
    }
}

/// Render `balance / 10^decimals` with [`DISPLAY_PLACES`] places, rounding half up.
///
/// Integer arithmetic only, so large jetton balances keep every digit.
pub fn format_units(balance: u128, decimals: u32) -> String {
    let scaled = if decimals >= DISPLAY_PLACES {
        match 10u128.checked_pow(decimals - DISPLAY_PLACES) {
            Some(divisor) => {
                let (quotient, remainder) = (balance / divisor, balance % divisor);
                if remainder >= divisor - remainder {
                    quotient + 1
                } else {
                    quotient
                }
            }
            // divisor beyond u128: the value is below half a display unit
            None => 0,
        }
    } else {
        balance.saturating_mul(10u128.pow(DISPLAY_PLACES - decimals))
    };

    let unit = 10u128.pow(DISPLAY_PLACES);
    format!("{}.{:06}", scaled / unit, scaled % unit)
}
