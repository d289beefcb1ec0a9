pub mod tonapi;
pub mod toncenter;
pub mod traits;

pub use tonapi::TonapiClient;
pub use toncenter::ToncenterClient;
pub use traits::FundsSource;
