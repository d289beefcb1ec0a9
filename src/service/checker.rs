//! Interactive check loop: collect text, extract the phrase, derive wallets,
//! resolve and print their funds, then ask again.

use std::io::{self, BufRead, Write};

use tracing::info;

use crate::blockchain::FundsSource;
use crate::config::CheckerConfig;
use crate::core::errors::{CheckerError, Result};
use crate::core::extract::extract_mnemonic;
use crate::core::mnemonic::Mnemonic;
use crate::core::wallet::{derive_candidates, WalletDeriver};
use crate::report::render_wallet;

pub const PROMPT: &str = "[?] Please, enter plain text & input 0 for start working with it:";
/// Line that ends a block of pasted text.
pub const END_OF_TEXT: &str = "0";
/// Line that ends the program. Not a wordlist word, so it never collides with a phrase.
pub const QUIT: &str = "q";

/// Result of one round of input collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ingested {
    Text(String),
    Quit,
}

/// Read lines until [`END_OF_TEXT`], [`QUIT`] or end of input.
///
/// End of input with text collected returns that text; the next call then
/// reports [`Ingested::Quit`].
pub fn read_text<R: BufRead>(input: &mut R) -> io::Result<Ingested> {
    let mut text = String::new();
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(if text.trim().is_empty() { Ingested::Quit } else { Ingested::Text(text) });
        }
        let line = line.trim_end_matches(['\r', '\n']);
        match line {
            END_OF_TEXT => return Ok(Ingested::Text(text)),
            QUIT => return Ok(Ingested::Quit),
            _ => {
                text.push_str(line);
                text.push('\n');
            }
        }
    }
}

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub mnemonics_checked: usize,
    pub wallets_checked: usize,
    pub invalid_inputs: usize,
}

pub struct Checker<D, F> {
    config: CheckerConfig,
    deriver: D,
    funds: F,
    once: bool,
}

impl<D, F> Checker<D, F>
where
    D: WalletDeriver,
    F: FundsSource,
{
    pub fn new(config: CheckerConfig, deriver: D, funds: F) -> Self {
        Self { config, deriver, funds, once: false }
    }

    /// Stop after the first successfully checked phrase.
    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Run the prompt loop until the user quits or input ends.
    ///
    /// Invalid phrases re-prompt; network and derivation failures end the run.
    pub async fn run<R, W>(&self, input: &mut R, out: &mut W) -> Result<RunSummary>
    where
        R: BufRead,
        W: Write,
    {
        let mut summary = RunSummary::default();
        loop {
            writeln!(out, "{PROMPT}")?;
            out.flush()?;

            let text = match read_text(input)? {
                Ingested::Text(text) => text,
                Ingested::Quit => break,
            };

            let mnemonic = match extract_mnemonic(&text) {
                Ok(mnemonic) => mnemonic,
                Err(CheckerError::InvalidMnemonic { found }) => {
                    writeln!(out, "[?] Extracted mnemonic phrase is not valid")?;
                    writeln!(out, "Reference: {found:?}")?;
                    summary.invalid_inputs += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };
            writeln!(out, "[!] Extracted mnemonic phrase: {}", mnemonic.phrase())?;

            summary.wallets_checked += self.check_mnemonic(&mnemonic, out).await?;
            summary.mnemonics_checked += 1;
            if self.once {
                break;
            }
        }

        info!(?summary, "Check loop finished");
        Ok(summary)
    }

    /// Derive every configured wallet of `mnemonic` and report its funds.
    ///
    /// Returns the number of wallets reported.
    pub async fn check_mnemonic<W: Write>(
        &self,
        mnemonic: &Mnemonic,
        out: &mut W,
    ) -> Result<usize> {
        let candidates = derive_candidates(
            &self.deriver,
            mnemonic,
            &self.config.ignore_wallet_versions,
            &self.config.wallet_ids,
        )?;

        for candidate in &candidates {
            writeln!(out, "[!] Checking wallet {} {}...", candidate.version, candidate.wallet_id)?;
            info!(version = %candidate.version, wallet_id = candidate.wallet_id, "Checking wallet");
            let funds = self.funds.resolve(&candidate.address).await?;
            render_wallet(out, candidate, mnemonic, &funds)?;
            out.flush()?;
        }
        Ok(candidates.len())
    }
}
