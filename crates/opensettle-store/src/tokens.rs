//! Token row operations.
//!
//! Token rows are created once at issuance — after the external ledger's
//! mint side effect has succeeded — and never mutated. Field validation
//! happens at the payload boundary; the store inserts what it is given.

use chrono::Utc;
use opensettle_types::{NewToken, Result, SettleError, Token, TokenId, UserId};

use crate::Tx;

impl Tx<'_> {
    /// Insert a token row, assigning its id and timestamp.
    pub fn create_token(&mut self, new: NewToken) -> Token {
        let token = Token {
            id: self.state.next_token_id(),
            contract_address: new.contract_address,
            name: new.name,
            symbol: new.symbol,
            owner_id: new.owner_id,
            created_at: Utc::now(),
        };
        self.state.tokens.insert(token.id, token.clone());
        token
    }

    /// Fetch a token by id.
    ///
    /// # Errors
    /// Returns [`SettleError::TokenNotFound`] when absent.
    pub fn token(&self, id: TokenId) -> Result<Token> {
        self.state
            .tokens
            .get(&id)
            .cloned()
            .ok_or(SettleError::TokenNotFound(id))
    }

    /// All tokens issued by the owner, oldest first.
    #[must_use]
    pub fn tokens_by_owner(&self, owner_id: UserId) -> Vec<Token> {
        self.state
            .tokens
            .values()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Store;

    fn new_token(owner: u64, symbol: &str) -> NewToken {
        NewToken {
            contract_address: format!("0x{symbol}"),
            name: format!("{symbol} Token"),
            symbol: symbol.to_string(),
            owner_id: UserId(owner),
        }
    }

    #[test]
    fn create_token_assigns_sequential_ids() {
        let store = Store::new();
        store
            .transaction(|tx| {
                let a = tx.create_token(new_token(1, "AAA"));
                let b = tx.create_token(new_token(1, "BBB"));
                assert_eq!(a.id, TokenId(1));
                assert_eq!(b.id, TokenId(2));
                assert_eq!(tx.token(a.id)?, a);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn missing_token_is_not_found() {
        let store = Store::new();
        let err = store
            .transaction(|tx| tx.token(TokenId(5)))
            .unwrap_err();
        assert!(matches!(err, SettleError::TokenNotFound(TokenId(5))));
    }

    #[test]
    fn tokens_by_owner_filters_and_keeps_insertion_order() {
        let store = Store::new();
        store
            .transaction(|tx| {
                let a = tx.create_token(new_token(1, "AAA"));
                tx.create_token(new_token(2, "BBB"));
                let c = tx.create_token(new_token(1, "CCC"));
                let mine = tx.tokens_by_owner(UserId(1));
                let ids: Vec<_> = mine.iter().map(|t| t.id).collect();
                assert_eq!(ids, vec![a.id, c.id]);
                Ok(())
            })
            .unwrap();
    }
}
