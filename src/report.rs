//! Human-readable report of a checked wallet.

use std::io::{self, Write};

use crate::core::domain::{FundsSnapshot, NATIVE_TOKEN_KEY};
use crate::core::mnemonic::Mnemonic;
use crate::core::wallet::WalletCandidate;

pub const EXPLORER_ADDRESS_URL: &str = "https://tonscan.org/address/";

const ITEM_INDENT: &str = "    ";
const METADATA_INDENT: &str = "        ";

/// Write the report block for one wallet.
pub fn render_wallet<W: Write>(
    out: &mut W,
    candidate: &WalletCandidate,
    mnemonic: &Mnemonic,
    funds: &FundsSnapshot,
) -> io::Result<()> {
    writeln!(
        out,
        "[+] Wallet {} {} {}",
        candidate.version,
        candidate.wallet_id,
        mnemonic.short_label()
    )?;
    writeln!(out, "{EXPLORER_ADDRESS_URL}{}", candidate.address)?;

    for (key, holding) in funds.tokens() {
        let label = if key == NATIVE_TOKEN_KEY {
            "Account balance".to_string()
        } else {
            format!("Jetton {} {}", holding.name, key)
        };
        writeln!(
            out,
            "{ITEM_INDENT}[+] {}: {} {}",
            label,
            holding.display_amount(),
            holding.symbol.to_uppercase()
        )?;
    }

    for (key, nft) in funds.nfts() {
        writeln!(out, "{ITEM_INDENT}[+] NFT {key}:")?;
        let pretty = serde_json::to_string_pretty(&nft.metadata).map_err(io::Error::other)?;
        for line in pretty.lines() {
            writeln!(out, "{METADATA_INDENT}{line}")?;
        }
    }

    Ok(())
}
