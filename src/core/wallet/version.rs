use std::fmt;
use std::str::FromStr;

use crate::core::errors::CheckerError;

/// Wallet contract versions a recovery phrase is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WalletVersion {
    V2R1,
    V2R2,
    V3R1,
    V3R2,
    V4R2,
    /// Highload wallet v2.
    HighloadV2,
}

impl WalletVersion {
    /// Every supported version, in derivation order.
    pub const ALL: [WalletVersion; 6] = [
        WalletVersion::V2R1,
        WalletVersion::V2R2,
        WalletVersion::V3R1,
        WalletVersion::V3R2,
        WalletVersion::V4R2,
        WalletVersion::HighloadV2,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            WalletVersion::V2R1 => "v2r1",
            WalletVersion::V2R2 => "v2r2",
            WalletVersion::V3R1 => "v3r1",
            WalletVersion::V3R2 => "v3r2",
            WalletVersion::V4R2 => "v4r2",
            WalletVersion::HighloadV2 => "hv2",
        }
    }
}

impl fmt::Display for WalletVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for WalletVersion {
    type Err = CheckerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        WalletVersion::ALL
            .into_iter()
            .find(|v| v.tag() == wanted)
            .ok_or_else(|| CheckerError::Config(format!("unknown wallet version: {s}")))
    }
}
