pub mod domain;
pub mod errors;
pub mod extract;
pub mod mnemonic;
pub mod wallet;

pub use domain::{FundsSnapshot, NftHolding, TokenHolding};
pub use errors::{CheckerError, Result};
pub use mnemonic::Mnemonic;
