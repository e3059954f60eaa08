//! The settlement engine — the four user-facing operations plus issuance.
//!
//! Every operation runs as one coordinated transaction against the store;
//! any failure inside the unit discards all of its writes, so no partial
//! balance or status change is ever observable and retries are safe.
//!
//! ## Escrow discipline
//!
//! Placing a sell order debits the full amount from the seller's balance
//! immediately; from then on the *open order itself* is the custodian of
//! that quantity. Execute hands the escrowed amount to the buyer without
//! touching the seller's row again, and Cancel credits it back. Buy orders
//! escrow nothing — executing one moves the amount out of the owner's
//! current balance, which is where the execute-time sufficiency check can
//! genuinely fail.

use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::CheckedSub;
use opensettle_store::Store;
use opensettle_types::{
    Balance, NewOrder, NewToken, NewTrade, Order, OrderId, OrderSide, OrderStatus, Result,
    SettleError, Token, TokenId, TokenIssue, Trade, UserId,
};

use crate::mint::TokenMint;

/// Composes ledger and order book operations into atomic settlement
/// operations. Construct once at startup with the shared store and the
/// issuance capability, and share by reference.
pub struct SettlementEngine<M: TokenMint> {
    store: Arc<Store>,
    minter: M,
}

impl<M: TokenMint> SettlementEngine<M> {
    pub fn new(store: Arc<Store>, minter: M) -> Self {
        Self { store, minter }
    }

    /// Place a buy or sell order.
    ///
    /// Sell orders escrow their full amount: the seller's balance is
    /// debited before the order row is written, inside the same unit.
    ///
    /// # Errors
    /// - [`SettleError::TokenNotFound`] for an unknown token
    /// - [`SettleError::InsufficientBalance`] when a sell exceeds the
    ///   seller's balance
    /// - [`SettleError::InvalidOrder`] for a zero amount or price
    pub fn place(&self, user: UserId, new: NewOrder) -> Result<Order> {
        self.store.transaction(|tx| {
            tx.token(new.token_id)?;
            if new.side.escrows() {
                let available = tx.balance(user, new.token_id);
                let remainder = available.checked_sub(&new.amount).ok_or_else(|| {
                    SettleError::InsufficientBalance {
                        needed: new.amount.clone(),
                        available: available.clone(),
                    }
                })?;
                tx.set_balance(user, new.token_id, remainder);
            }
            let order = tx.create_order(user, new)?;
            tracing::debug!(user = %user, order = %order.id, side = %order.side, "order placed");
            Ok(order)
        })
    }

    /// Execute (fill) a specific open order on behalf of `executor`.
    ///
    /// The entire order amount transfers atomically or not at all; exactly
    /// one trade row is recorded and the order becomes `filled`. The trade
    /// always records the order's owner as seller and the executor as
    /// buyer. For a sell order the amount comes out of the escrow carried
    /// by the order; for a buy order it comes out of the owner's current
    /// balance.
    ///
    /// # Errors
    /// - [`SettleError::OrderNotFound`] for an unknown order
    /// - [`SettleError::OrderNotOpen`] when the order is already terminal
    /// - [`SettleError::InsufficientBalance`] when a buy order's owner
    ///   cannot deliver the amount
    pub fn execute(&self, executor: UserId, order_id: OrderId) -> Result<Trade> {
        self.store.transaction(|tx| {
            let order = tx.order(order_id)?;
            if !order.is_open() {
                return Err(SettleError::OrderNotOpen {
                    id: order.id,
                    status: order.status,
                });
            }
            let owner = order.user_id;
            if !order.side.escrows() {
                // No escrow backs this order: the owner delivers from their
                // current balance, and the sufficiency check has real bite.
                let available = tx.balance(owner, order.token_id);
                let remainder = available.checked_sub(&order.amount).ok_or_else(|| {
                    tracing::warn!(
                        order = %order.id,
                        owner = %owner,
                        "order owner cannot deliver the order amount"
                    );
                    SettleError::InsufficientBalance {
                        needed: order.amount.clone(),
                        available: available.clone(),
                    }
                })?;
                tx.set_balance(owner, order.token_id, remainder);
            }
            let holding = tx.balance(executor, order.token_id);
            tx.set_balance(executor, order.token_id, holding + &order.amount);

            let trade = tx.create_trade(NewTrade {
                seller_id: owner,
                buyer_id: executor,
                token_id: order.token_id,
                amount: order.amount.clone(),
                price: order.price.clone(),
            });
            tx.update_order_status(order.id, OrderStatus::Filled)?;
            tracing::info!(
                trade = %trade.id,
                order = %order.id,
                seller = %owner,
                buyer = %executor,
                "order executed"
            );
            Ok(trade)
        })
    }

    /// Cancel an open order owned by `user`, refunding any escrow.
    ///
    /// # Errors
    /// - [`SettleError::OrderNotFound`] for an unknown order
    /// - [`SettleError::NotOrderOwner`] when `user` does not own it
    /// - [`SettleError::OrderNotOpen`] when it is already terminal
    pub fn cancel(&self, user: UserId, order_id: OrderId) -> Result<Order> {
        self.store.transaction(|tx| {
            let order = tx.order(order_id)?;
            if order.user_id != user {
                return Err(SettleError::NotOrderOwner {
                    id: order.id,
                    user,
                });
            }
            if !order.is_open() {
                return Err(SettleError::OrderNotOpen {
                    id: order.id,
                    status: order.status,
                });
            }
            if order.side.escrows() {
                let holding = tx.balance(user, order.token_id);
                tx.set_balance(user, order.token_id, holding + &order.amount);
            }
            tx.update_order_status(order.id, OrderStatus::Cancelled)?;
            tracing::debug!(user = %user, order = %order.id, "order cancelled");
            Ok(Order {
                status: OrderStatus::Cancelled,
                ..order
            })
        })
    }

    /// List the open orders for one side of a token's book, cheapest
    /// first. Read-only, but still runs under the coordinator so the view
    /// is a consistent snapshot.
    pub fn list_open(&self, token_id: TokenId, side: OrderSide) -> Result<Vec<Order>> {
        self.store.transaction(|tx| Ok(tx.open_orders(token_id, side)))
    }

    /// Issue a new token: perform the external mint side effect, record
    /// the token row, and credit the owner with the initial supply — all
    /// in one unit. A failed mint commits nothing.
    ///
    /// # Errors
    /// Returns [`SettleError::MintRejected`] when the external ledger
    /// refuses the mint.
    pub fn issue(&self, owner: UserId, issue: TokenIssue) -> Result<Token> {
        self.store.transaction(|tx| {
            let contract_address =
                self.minter
                    .mint_initial_supply(&issue.name, &issue.symbol, &issue.initial_supply)?;
            let token = tx.create_token(NewToken {
                contract_address,
                name: issue.name.clone(),
                symbol: issue.symbol.clone(),
                owner_id: owner,
            });
            tx.set_balance(owner, token.id, issue.initial_supply.clone());
            tracing::info!(
                token = %token.id,
                symbol = %token.symbol,
                owner = %owner,
                "token issued"
            );
            Ok(token)
        })
    }

    /// The user's holding of a token. Absent rows read as zero; the token
    /// itself must exist.
    pub fn balance_of(&self, user: UserId, token_id: TokenId) -> Result<Balance> {
        self.store.transaction(|tx| {
            tx.token(token_id)?;
            Ok(tx.balance_row(user, token_id))
        })
    }

    /// All tokens issued by `owner`.
    pub fn tokens_of(&self, owner: UserId) -> Result<Vec<Token>> {
        self.store.transaction(|tx| Ok(tx.tokens_by_owner(owner)))
    }

    /// All trades the user took part in, newest first.
    pub fn trades_of(&self, user: UserId) -> Result<Vec<Trade>> {
        self.store.transaction(|tx| Ok(tx.user_trades(user)))
    }

    /// Sum of every ledger row for the token. While a sell order is open
    /// its escrowed amount lives with the order, not the ledger, so this
    /// dips by the escrow and recovers on execute or cancel.
    pub fn circulating_supply(&self, token_id: TokenId) -> Result<BigUint> {
        self.store.transaction(|tx| Ok(tx.total_supply(token_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mint::LocalMint;

    fn engine() -> SettlementEngine<LocalMint> {
        SettlementEngine::new(Arc::new(Store::new()), LocalMint)
    }

    fn issue_to(engine: &SettlementEngine<LocalMint>, owner: UserId, supply: u32) -> Token {
        engine
            .issue(
                owner,
                TokenIssue {
                    name: "Test Token".into(),
                    symbol: "TST".into(),
                    initial_supply: BigUint::from(supply),
                },
            )
            .unwrap()
    }

    fn sell(token_id: TokenId, amount: u32, price: u32) -> NewOrder {
        NewOrder {
            token_id,
            side: OrderSide::Sell,
            amount: BigUint::from(amount),
            price: BigUint::from(price),
        }
    }

    fn buy(token_id: TokenId, amount: u32, price: u32) -> NewOrder {
        NewOrder {
            token_id,
            side: OrderSide::Buy,
            amount: BigUint::from(amount),
            price: BigUint::from(price),
        }
    }

    #[test]
    fn issue_records_token_and_initial_balance() {
        let engine = engine();
        let owner = UserId(1);
        let token = issue_to(&engine, owner, 1000);
        assert!(!token.contract_address.is_empty());
        assert_eq!(
            engine.balance_of(owner, token.id).unwrap().amount,
            BigUint::from(1000u32)
        );
        assert_eq!(engine.tokens_of(owner).unwrap(), vec![token]);
    }

    #[test]
    fn place_sell_escrows_immediately() {
        let engine = engine();
        let seller = UserId(1);
        let token = issue_to(&engine, seller, 100);

        let order = engine.place(seller, sell(token.id, 40, 10)).unwrap();
        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(
            engine.balance_of(seller, token.id).unwrap().amount,
            BigUint::from(60u32)
        );
    }

    #[test]
    fn place_sell_beyond_balance_changes_nothing() {
        let engine = engine();
        let seller = UserId(1);
        let token = issue_to(&engine, seller, 100);

        let err = engine.place(seller, sell(token.id, 101, 10)).unwrap_err();
        assert!(matches!(err, SettleError::InsufficientBalance { .. }));
        assert_eq!(
            engine.balance_of(seller, token.id).unwrap().amount,
            BigUint::from(100u32)
        );
        assert!(engine.list_open(token.id, OrderSide::Sell).unwrap().is_empty());
    }

    #[test]
    fn place_buy_does_not_escrow() {
        let engine = engine();
        let owner = UserId(1);
        let token = issue_to(&engine, owner, 100);
        let buyer = UserId(2);

        engine.place(buyer, buy(token.id, 40, 10)).unwrap();
        assert_eq!(
            engine.balance_of(buyer, token.id).unwrap().amount,
            BigUint::ZERO
        );
        assert_eq!(engine.list_open(token.id, OrderSide::Buy).unwrap().len(), 1);
    }

    #[test]
    fn place_on_unknown_token_fails() {
        let engine = engine();
        let err = engine
            .place(UserId(1), sell(TokenId(99), 10, 1))
            .unwrap_err();
        assert!(matches!(err, SettleError::TokenNotFound(_)));
    }

    #[test]
    fn execute_sell_moves_escrow_to_buyer() {
        let engine = engine();
        let seller = UserId(1);
        let buyer = UserId(2);
        let token = issue_to(&engine, seller, 100);

        let order = engine.place(seller, sell(token.id, 100, 10)).unwrap();
        let trade = engine.execute(buyer, order.id).unwrap();

        assert_eq!(trade.seller_id, seller);
        assert_eq!(trade.buyer_id, buyer);
        assert_eq!(trade.amount, BigUint::from(100u32));
        assert_eq!(trade.price, BigUint::from(10u32));

        assert_eq!(
            engine.balance_of(seller, token.id).unwrap().amount,
            BigUint::ZERO
        );
        assert_eq!(
            engine.balance_of(buyer, token.id).unwrap().amount,
            BigUint::from(100u32)
        );
        // Supply back in circulation after settlement.
        assert_eq!(
            engine.circulating_supply(token.id).unwrap(),
            BigUint::from(100u32)
        );
    }

    #[test]
    fn execute_buy_debits_owner_current_balance() {
        let engine = engine();
        let owner = UserId(1);
        let executor = UserId(2);
        let token = issue_to(&engine, owner, 100);

        let order = engine.place(owner, buy(token.id, 30, 5)).unwrap();
        engine.execute(executor, order.id).unwrap();

        assert_eq!(
            engine.balance_of(owner, token.id).unwrap().amount,
            BigUint::from(70u32)
        );
        assert_eq!(
            engine.balance_of(executor, token.id).unwrap().amount,
            BigUint::from(30u32)
        );
    }

    #[test]
    fn execute_buy_with_underfunded_owner_fails_cleanly() {
        let engine = engine();
        let owner = UserId(1);
        let executor = UserId(2);
        let token = issue_to(&engine, owner, 20);

        let order = engine.place(owner, buy(token.id, 30, 5)).unwrap();
        let err = engine.execute(executor, order.id).unwrap_err();
        assert!(matches!(err, SettleError::InsufficientBalance { .. }));

        // Nothing moved, order still open, no trade row.
        assert_eq!(
            engine.balance_of(owner, token.id).unwrap().amount,
            BigUint::from(20u32)
        );
        assert_eq!(
            engine.balance_of(executor, token.id).unwrap().amount,
            BigUint::ZERO
        );
        assert_eq!(engine.list_open(token.id, OrderSide::Buy).unwrap().len(), 1);
        assert!(engine.trades_of(executor).unwrap().is_empty());
    }

    #[test]
    fn execute_missing_or_terminal_order_fails() {
        let engine = engine();
        let seller = UserId(1);
        let buyer = UserId(2);
        let token = issue_to(&engine, seller, 100);

        let err = engine.execute(buyer, OrderId(77)).unwrap_err();
        assert!(matches!(err, SettleError::OrderNotFound(_)));

        let order = engine.place(seller, sell(token.id, 50, 10)).unwrap();
        engine.execute(buyer, order.id).unwrap();
        let err = engine.execute(buyer, order.id).unwrap_err();
        assert!(matches!(
            err,
            SettleError::OrderNotOpen {
                status: OrderStatus::Filled,
                ..
            }
        ));
    }

    #[test]
    fn cancel_sell_refunds_escrow_exactly() {
        let engine = engine();
        let seller = UserId(1);
        let token = issue_to(&engine, seller, 100);

        let order = engine.place(seller, sell(token.id, 100, 10)).unwrap();
        assert_eq!(
            engine.balance_of(seller, token.id).unwrap().amount,
            BigUint::ZERO
        );

        let cancelled = engine.cancel(seller, order.id).unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(
            engine.balance_of(seller, token.id).unwrap().amount,
            BigUint::from(100u32)
        );
    }

    #[test]
    fn cancel_enforces_ownership_before_state() {
        let engine = engine();
        let seller = UserId(1);
        let stranger = UserId(2);
        let token = issue_to(&engine, seller, 100);
        let order = engine.place(seller, sell(token.id, 50, 10)).unwrap();

        let err = engine.cancel(stranger, order.id).unwrap_err();
        assert!(matches!(err, SettleError::NotOrderOwner { .. }));

        engine.cancel(seller, order.id).unwrap();
        let err = engine.cancel(seller, order.id).unwrap_err();
        assert!(matches!(
            err,
            SettleError::OrderNotOpen {
                status: OrderStatus::Cancelled,
                ..
            }
        ));
    }

    #[test]
    fn cancel_buy_moves_no_balance() {
        let engine = engine();
        let owner = UserId(1);
        let token = issue_to(&engine, owner, 100);
        let order = engine.place(owner, buy(token.id, 30, 5)).unwrap();

        engine.cancel(owner, order.id).unwrap();
        assert_eq!(
            engine.balance_of(owner, token.id).unwrap().amount,
            BigUint::from(100u32)
        );
    }

    #[test]
    fn list_open_is_price_then_age_priority() {
        let engine = engine();
        let seller = UserId(1);
        let token = issue_to(&engine, seller, 100);

        let pricey = engine.place(seller, sell(token.id, 10, 30)).unwrap();
        let cheap = engine.place(seller, sell(token.id, 10, 10)).unwrap();
        let cheap_later = engine.place(seller, sell(token.id, 10, 10)).unwrap();

        let listed = engine.list_open(token.id, OrderSide::Sell).unwrap();
        let ids: Vec<OrderId> = listed.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![cheap.id, cheap_later.id, pricey.id]);
    }

    #[test]
    fn balance_of_unknown_token_fails() {
        let engine = engine();
        let err = engine.balance_of(UserId(1), TokenId(9)).unwrap_err();
        assert!(matches!(err, SettleError::TokenNotFound(_)));
    }
}
