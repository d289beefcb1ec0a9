use thiserror::Error;

use crate::core::wallet::WalletVersion;

/// Errors produced while checking a recovery phrase.
#[derive(Debug, Error)]
pub enum CheckerError {
    /// The pasted text did not yield exactly 24 wordlist words.
    ///
    /// This is the only recoverable failure: the caller asks for new input.
    #[error("extracted mnemonic phrase is not valid: found {} words, expected 24", .found.len())]
    InvalidMnemonic { found: Vec<String> },

    /// Configuration values could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The wallet SDK refused to build a wallet for the given target.
    #[error("wallet derivation failed for {version} {wallet_id}: {reason}")]
    Derivation { version: WalletVersion, wallet_id: u32, reason: String },

    /// Transport level failure or non-success status from a remote service.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A remote service answered with a body that could not be decoded.
    #[error("unexpected response from {service}: {reason}")]
    UnexpectedResponse { service: &'static str, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CheckerError {
    /// Whether the pipeline should restart input collection instead of stopping.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CheckerError::InvalidMnemonic { .. })
    }
}

pub type Result<T> = std::result::Result<T, CheckerError>;
