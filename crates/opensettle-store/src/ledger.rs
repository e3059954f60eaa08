//! Balance ledger operations.
//!
//! Per (user, token) pair the ledger holds one non-negative amount — the
//! unit of truth for ownership. Rows are created lazily on first credit and
//! absence reads as zero. The ledger performs no arithmetic: callers compute
//! the new value from a prior read inside the same transaction, and the
//! amount type makes a negative write unrepresentable.

use num_bigint::BigUint;
use opensettle_types::{Balance, TokenId, UserId};

use crate::Tx;

impl Tx<'_> {
    /// Current balance for the pair. Zero when no row exists.
    #[must_use]
    pub fn balance(&self, user_id: UserId, token_id: TokenId) -> BigUint {
        self.state
            .balances
            .get(&(user_id, token_id))
            .cloned()
            .unwrap_or_default()
    }

    /// Upsert the pair's row to exactly `amount`.
    pub fn set_balance(&mut self, user_id: UserId, token_id: TokenId, amount: BigUint) {
        self.state.balances.insert((user_id, token_id), amount);
    }

    /// The pair's holding as a row, for balance queries.
    #[must_use]
    pub fn balance_row(&self, user_id: UserId, token_id: TokenId) -> Balance {
        Balance {
            user_id,
            token_id,
            amount: self.balance(user_id, token_id),
        }
    }

    /// Sum of every holder's balance for a token. An open sell order holds
    /// its escrow outside the ledger, so this dips by the escrowed amount
    /// until the order settles or is cancelled.
    #[must_use]
    pub fn total_supply(&self, token_id: TokenId) -> BigUint {
        self.state
            .balances
            .iter()
            .filter(|((_, t), _)| *t == token_id)
            .map(|(_, amount)| amount)
            .sum()
    }

}
