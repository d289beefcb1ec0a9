use clap::Parser;

/// TON mnemonic checker CLI (library-facing definitions)
///
/// Paste text containing a 24-word recovery phrase, finish it with a line
/// holding `0`, and every configured wallet version / id is derived and its
/// balances printed. Enter `q` to quit.
///
/// Settings come from the environment: IGNORE_WALLET_VERSIONS,
/// SUPPORTED_WALLET_IDS, TONAPI_KEY, TONAPI_HOST, TONCENTER_HOST,
/// TONCENTER_API_KEY, FREE_TIER_DELAY.
#[derive(Debug, Parser)]
#[command(name = "ton-mnemonic-checker", version, about, long_about = None)]
pub struct Cli {
    /// Exit after the first phrase has been checked
    #[arg(long)]
    pub once: bool,
}
