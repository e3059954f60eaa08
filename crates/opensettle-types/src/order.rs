//! Order model for the OpenSettle settlement core.
//!
//! Orders are filled one at a time by explicit reference — there is no
//! auto-matching and no partial fill. A sell order escrows its full amount
//! at placement; a buy order escrows nothing (only token quantities are
//! tracked as balances, not the quote currency).

use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::{OrderId, TokenId, UserId, amount};

/// Which side of the book this order is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Whether placing an order on this side escrows the token amount.
    /// Only sell orders move funds at placement time.
    #[must_use]
    pub fn escrows(self) -> bool {
        matches!(self, Self::Sell)
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Lifecycle status of an order.
///
/// `Open` is the only non-terminal state: Execute moves it to `Filled`,
/// Cancel moves it to `Cancelled`, and nothing moves it out of either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Filled,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states permit no further transition.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Filled | Self::Cancelled)
    }

    /// Whether moving from `self` to `next` is a legal lifecycle step.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self == Self::Open && next.is_terminal()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Filled => write!(f, "filled"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A stored order row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub token_id: TokenId,
    pub side: OrderSide,
    #[serde(with = "amount::serde_string")]
    pub amount: BigUint,
    #[serde(with = "amount::serde_string")]
    pub price: BigUint,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }
}

/// Fields of an order about to be inserted. The store assigns the id,
/// stamps `created_at`, and sets the status to `Open`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub token_id: TokenId,
    pub side: OrderSide,
    pub amount: BigUint,
    pub price: BigUint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_display_and_serde_agree() {
        assert_eq!(OrderSide::Buy.to_string(), "buy");
        assert_eq!(serde_json::to_string(&OrderSide::Sell).unwrap(), "\"sell\"");
        let back: OrderSide = serde_json::from_str("\"buy\"").unwrap();
        assert_eq!(back, OrderSide::Buy);
    }

    #[test]
    fn only_sell_escrows() {
        assert!(OrderSide::Sell.escrows());
        assert!(!OrderSide::Buy.escrows());
    }

    #[test]
    fn open_is_the_only_non_terminal_state() {
        assert!(!OrderStatus::Open.is_terminal());
        assert!(OrderStatus::Filled.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn legal_transitions_leave_open_only() {
        assert!(OrderStatus::Open.can_transition_to(OrderStatus::Filled));
        assert!(OrderStatus::Open.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Open.can_transition_to(OrderStatus::Open));
        assert!(!OrderStatus::Filled.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Filled));
        assert!(!OrderStatus::Filled.can_transition_to(OrderStatus::Open));
    }

    #[test]
    fn order_serializes_amounts_as_strings() {
        let order = Order {
            id: OrderId(1),
            user_id: UserId(2),
            token_id: TokenId(3),
            side: OrderSide::Sell,
            amount: BigUint::from(100u32),
            price: BigUint::from(10u32),
            status: OrderStatus::Open,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains(r#""amount":"100""#));
        assert!(json.contains(r#""price":"10""#));
        assert!(json.contains(r#""status":"open""#));
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }
}
