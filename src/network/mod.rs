pub mod rate_limit;

pub use rate_limit::{FreeTierDelay, NoPause, Pause, TokioSleep};
