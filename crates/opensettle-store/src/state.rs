//! The relational state owned by the store.
//!
//! Four relations mirror the persisted layout: tokens, balances (unique per
//! user+token pair), orders, and trades. Users live with the external
//! identity collaborator and appear here only as ids. The whole state is
//! `Clone` so the transaction coordinator can work on a private copy and
//! commit it by swap.

use std::collections::{BTreeMap, HashMap};

use num_bigint::BigUint;
use opensettle_types::{Order, OrderId, Token, TokenId, Trade, TradeId, UserId};

#[derive(Debug, Clone, Default)]
pub(crate) struct StoreState {
    token_seq: u64,
    order_seq: u64,
    trade_seq: u64,
    pub(crate) tokens: BTreeMap<TokenId, Token>,
    pub(crate) balances: HashMap<(UserId, TokenId), BigUint>,
    pub(crate) orders: BTreeMap<OrderId, Order>,
    pub(crate) trades: BTreeMap<TradeId, Trade>,
}

impl StoreState {
    /// Next token primary key, starting at 1.
    pub(crate) fn next_token_id(&mut self) -> TokenId {
        self.token_seq += 1;
        TokenId(self.token_seq)
    }

    /// Next order primary key, starting at 1. Assignment order matches
    /// creation order, which `open_orders` relies on for tie-breaking.
    pub(crate) fn next_order_id(&mut self) -> OrderId {
        self.order_seq += 1;
        OrderId(self.order_seq)
    }

    /// Next trade primary key, starting at 1.
    pub(crate) fn next_trade_id(&mut self) -> TradeId {
        self.trade_seq += 1;
        TradeId(self.trade_seq)
    }
}
