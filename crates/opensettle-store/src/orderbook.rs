//! Order book store operations.
//!
//! Orders carry a three-state lifecycle (`open` → `filled` | `cancelled`);
//! trades are immutable rows produced by Execute. `update_order_status` is
//! an unconditional overwrite — verifying that a transition is legal is the
//! settlement engine's job, and the enclosing transaction's exclusivity is
//! what makes its fetch-then-update sequence safe.

use chrono::Utc;
use num_traits::Zero;
use opensettle_types::{
    NewOrder, NewTrade, Order, OrderId, OrderSide, OrderStatus, Result, SettleError, TokenId,
    Trade, UserId,
};

use crate::Tx;

impl Tx<'_> {
    /// Insert an order in `open` status, assigning its id and timestamp.
    ///
    /// # Errors
    /// Returns [`SettleError::InvalidOrder`] when amount or price is zero.
    pub fn create_order(&mut self, owner: UserId, new: NewOrder) -> Result<Order> {
        if new.amount.is_zero() {
            return Err(SettleError::InvalidOrder {
                reason: "amount must be positive".into(),
            });
        }
        if new.price.is_zero() {
            return Err(SettleError::InvalidOrder {
                reason: "price must be positive".into(),
            });
        }
        let order = Order {
            id: self.state.next_order_id(),
            user_id: owner,
            token_id: new.token_id,
            side: new.side,
            amount: new.amount,
            price: new.price,
            status: OrderStatus::Open,
            created_at: Utc::now(),
        };
        self.state.orders.insert(order.id, order.clone());
        Ok(order)
    }

    /// Fetch an order by id.
    ///
    /// # Errors
    /// Returns [`SettleError::OrderNotFound`] when absent.
    pub fn order(&self, id: OrderId) -> Result<Order> {
        self.state
            .orders
            .get(&id)
            .cloned()
            .ok_or(SettleError::OrderNotFound(id))
    }

    /// All `open` orders for the token and side, cheapest first; price ties
    /// break by age (then id, since ids follow creation order).
    #[must_use]
    pub fn open_orders(&self, token_id: TokenId, side: OrderSide) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .state
            .orders
            .values()
            .filter(|o| o.token_id == token_id && o.side == side && o.is_open())
            .cloned()
            .collect();
        orders.sort_by(|a, b| {
            a.price
                .cmp(&b.price)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        orders
    }

    /// Overwrite an order's status unconditionally.
    ///
    /// # Errors
    /// Returns [`SettleError::OrderNotFound`] when absent.
    pub fn update_order_status(&mut self, id: OrderId, status: OrderStatus) -> Result<()> {
        let order = self
            .state
            .orders
            .get_mut(&id)
            .ok_or(SettleError::OrderNotFound(id))?;
        order.status = status;
        Ok(())
    }

    /// Record an immutable trade row, assigning its id and timestamp.
    pub fn create_trade(&mut self, new: NewTrade) -> Trade {
        let trade = Trade {
            id: self.state.next_trade_id(),
            seller_id: new.seller_id,
            buyer_id: new.buyer_id,
            token_id: new.token_id,
            amount: new.amount,
            price: new.price,
            created_at: Utc::now(),
        };
        self.state.trades.insert(trade.id, trade.clone());
        trade
    }

    /// All trades where the user was buyer or seller, newest first.
    #[must_use]
    pub fn user_trades(&self, user_id: UserId) -> Vec<Trade> {
        let mut trades: Vec<Trade> = self
            .state
            .trades
            .values()
            .filter(|t| t.involves(user_id))
            .cloned()
            .collect();
        trades.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        trades
    }

}
