//! # opensettle-store
//!
//! Relational state for the OpenSettle settlement core: the balance ledger,
//! the order book store, token rows, and the transaction coordinator that
//! gives every settlement operation all-or-nothing semantics.
//!
//! ## Architecture
//!
//! [`Store`] owns the whole state behind one exclusive lock. A unit of work
//! runs via [`Store::transaction`] against a private copy of the state and
//! commits by swap only on `Ok` — an error anywhere in the unit discards
//! every write it performed. Because the lock is held for the duration of
//! the unit, fetch-then-conditionally-update sequences are race-free: two
//! concurrent executions of one order serialize, and the loser observes the
//! terminal status.
//!
//! All row operations are methods on [`Tx`], grouped by relation:
//!
//! - `ledger`: balances per (user, token) pair — absence reads as zero
//! - `orderbook`: orders, their status lifecycle, and trade rows
//! - `tokens`: token rows created at issuance

mod ledger;
mod orderbook;
mod state;
mod tokens;
mod tx;

pub use tx::{Store, Tx};
