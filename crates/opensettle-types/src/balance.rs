//! Balance row type.
//!
//! The ledger keys balances by (user, token) and stores a single
//! non-negative amount. There is no frozen/available split: escrowing a
//! sell order debits the amount outright, and cancellation credits it back.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::{TokenId, UserId, amount};

/// One (user, token) holding, as surfaced by balance queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub user_id: UserId,
    pub token_id: TokenId,
    #[serde(with = "amount::serde_string")]
    pub amount: BigUint,
}

impl Balance {
    /// A zero holding for the pair — what an absent row reads as.
    #[must_use]
    pub fn empty(user_id: UserId, token_id: TokenId) -> Self {
        Self {
            user_id,
            token_id,
            amount: BigUint::ZERO,
        }
    }
}
