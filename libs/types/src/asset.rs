//! The asset a campaign is denominated in
//!
//! Every campaign escrows exactly one asset: either the platform's native
//! currency or a registered fungible token. The engine never inspects the
//! asset beyond this tag; all value movement goes through the escrow
//! interface of the bank.

use crate::ids::TokenId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tagged asset reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    /// Native currency, moved by value attachment
    Native,
    /// A fungible token ledger, moved via balance/allowance semantics
    Token(TokenId),
}

impl Asset {
    pub fn is_native(&self) -> bool {
        matches!(self, Asset::Native)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::Native => write!(f, "native"),
            Asset::Token(id) => write!(f, "token:{}", id),
        }
    }
}
