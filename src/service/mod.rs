pub mod checker;
pub mod funds;

// Re-export so callers can use `crate::service::Checker` directly
pub use checker::{Checker, RunSummary};
pub use funds::FundsResolver;
