//! Request payloads for the transport boundary.
//!
//! The settlement core is transport-agnostic: whatever routing layer sits in
//! front decodes a request into one of these payloads, calls `validate()`,
//! and hands the validated value to the engine. Amounts travel as base-10
//! strings and are rejected before any write when malformed or non-positive.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::{
    NewOrder, OrderId, OrderSide, Result, SettleError, TokenId, amount::parse_amount, constants,
};

/// Payload for placing a buy or sell order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderPayload {
    pub token_id: TokenId,
    pub order_type: OrderSide,
    pub amount: String,
    pub price: String,
}

impl PlaceOrderPayload {
    /// Validate into the store-facing [`NewOrder`].
    ///
    /// # Errors
    /// Returns [`SettleError::InvalidOrder`] when amount or price is
    /// malformed or zero.
    pub fn validate(&self) -> Result<NewOrder> {
        let amount = parse_amount(&self.amount).ok_or_else(|| SettleError::InvalidOrder {
            reason: format!("invalid amount: {:?}", self.amount),
        })?;
        if amount.is_zero() {
            return Err(SettleError::InvalidOrder {
                reason: "amount must be positive".into(),
            });
        }
        let price = parse_amount(&self.price).ok_or_else(|| SettleError::InvalidOrder {
            reason: format!("invalid price: {:?}", self.price),
        })?;
        if price.is_zero() {
            return Err(SettleError::InvalidOrder {
                reason: "price must be positive".into(),
            });
        }
        Ok(NewOrder {
            token_id: self.token_id,
            side: self.order_type,
            amount,
            price,
        })
    }
}

/// Payload for executing a specific open order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExecuteOrderPayload {
    pub order_id: OrderId,
}

/// Payload for cancelling a specific order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CancelOrderPayload {
    pub order_id: OrderId,
}

/// Payload for listing open orders on one side of a token's book.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListOrdersPayload {
    pub token_id: TokenId,
    pub order_type: OrderSide,
}

/// Payload for reading the caller's balance of a token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BalancePayload {
    pub token_id: TokenId,
}

/// A validated issuance request, ready for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIssue {
    pub name: String,
    pub symbol: String,
    pub initial_supply: BigUint,
}

/// Payload for issuing a new token with an initial supply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueTokenPayload {
    pub name: String,
    pub symbol: String,
    pub initial_supply: String,
}

impl IssueTokenPayload {
    /// Validate into a [`TokenIssue`].
    ///
    /// # Errors
    /// Returns [`SettleError::InvalidToken`] when the name or symbol is
    /// unusable or the supply is malformed or zero.
    pub fn validate(&self) -> Result<TokenIssue> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SettleError::InvalidToken {
                reason: "name is required".into(),
            });
        }
        let symbol = self.symbol.trim();
        if symbol.is_empty() {
            return Err(SettleError::InvalidToken {
                reason: "symbol is required".into(),
            });
        }
        if symbol.len() > constants::MAX_SYMBOL_LEN {
            return Err(SettleError::InvalidToken {
                reason: format!(
                    "symbol exceeds {} characters: {symbol:?}",
                    constants::MAX_SYMBOL_LEN
                ),
            });
        }
        let initial_supply =
            parse_amount(&self.initial_supply).ok_or_else(|| SettleError::InvalidToken {
                reason: format!("invalid initial supply: {:?}", self.initial_supply),
            })?;
        if initial_supply.is_zero() {
            return Err(SettleError::InvalidToken {
                reason: "initial supply must be positive".into(),
            });
        }
        Ok(TokenIssue {
            name: name.to_string(),
            symbol: symbol.to_string(),
            initial_supply,
        })
    }
}
