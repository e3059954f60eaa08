//! Trade model.
//!
//! A [`Trade`] is the immutable record of one executed order: the full
//! amount moved from seller to buyer at the order's unit price. Exactly one
//! trade exists per filled order.

use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::{TokenId, TradeId, UserId, amount};

/// A settled trade between two users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub seller_id: UserId,
    pub buyer_id: UserId,
    pub token_id: TokenId,
    #[serde(with = "amount::serde_string")]
    pub amount: BigUint,
    /// Unit price carried over from the executed order.
    #[serde(with = "amount::serde_string")]
    pub price: BigUint,
    pub created_at: DateTime<Utc>,
}

impl Trade {
    /// Money-equivalent recordkeeping value: amount × unit price.
    #[must_use]
    pub fn notional(&self) -> BigUint {
        &self.amount * &self.price
    }

    /// Whether the given user took part in this trade on either side.
    #[must_use]
    pub fn involves(&self, user: UserId) -> bool {
        self.seller_id == user || self.buyer_id == user
    }
}

impl std::fmt::Display for Trade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Trade[{}] {} -> {} {} x{} @ {}",
            self.id, self.seller_id, self.buyer_id, self.token_id, self.amount, self.price,
        )
    }
}

/// Fields of a trade about to be recorded. The store assigns the id and
/// stamps `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrade {
    pub seller_id: UserId,
    pub buyer_id: UserId,
    pub token_id: TokenId,
    pub amount: BigUint,
    pub price: BigUint,
}
