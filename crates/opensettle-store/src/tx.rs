//! Transaction coordinator.
//!
//! [`Store::transaction`] provides scoped all-or-nothing execution of a unit
//! of work. The unit runs against a private working copy of the state under
//! the store-wide exclusive lock; only a unit that returns `Ok` swaps its
//! copy in. An `Err` from any step discards every write the unit performed.
//!
//! Holding the exclusive lock for the duration of the unit is also the
//! isolation mechanism: a fetch-then-conditionally-update sequence (Execute,
//! Cancel) can never interleave with another writer, so two concurrent
//! executions of the same order id serialize and the loser observes the
//! terminal status.

use parking_lot::Mutex;

use opensettle_types::Result;

use crate::state::StoreState;

/// The shared store. Construct once at startup and pass by reference
/// (`Arc`) to the settlement engine.
#[derive(Debug, Default)]
pub struct Store {
    state: Mutex<StoreState>,
}

/// A transaction's view of the state. All ledger, order book, and token
/// operations are methods on this type, so every mutation is forced through
/// a coordinated unit.
#[derive(Debug)]
pub struct Tx<'a> {
    pub(crate) state: &'a mut StoreState,
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `unit` as one all-or-nothing transaction.
    ///
    /// # Errors
    /// Propagates the unit's error; in that case no write performed inside
    /// the unit is visible to any other transaction, past or future.
    pub fn transaction<T>(&self, unit: impl FnOnce(&mut Tx<'_>) -> Result<T>) -> Result<T> {
        let mut committed = self.state.lock();
        let mut working = committed.clone();
        let result = unit(&mut Tx {
            state: &mut working,
        });
        if result.is_ok() {
            *committed = working;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;
    use opensettle_types::{SettleError, TokenId, UserId};

    #[test]
    fn commit_makes_writes_visible() {
        let store = Store::new();
        store
            .transaction(|tx| {
                tx.set_balance(UserId(1), TokenId(1), BigUint::from(100u32));
                Ok(())
            })
            .unwrap();

        let balance = store
            .transaction(|tx| Ok(tx.balance(UserId(1), TokenId(1))))
            .unwrap();
        assert_eq!(balance, BigUint::from(100u32));
    }

    #[test]
    fn error_discards_every_write_in_the_unit() {
        let store = Store::new();
        store
            .transaction(|tx| {
                tx.set_balance(UserId(1), TokenId(1), BigUint::from(100u32));
                Ok(())
            })
            .unwrap();

        let err = store
            .transaction(|tx| {
                tx.set_balance(UserId(1), TokenId(1), BigUint::from(5u32));
                tx.set_balance(UserId(2), TokenId(1), BigUint::from(95u32));
                Err::<(), _>(SettleError::Internal("forced abort".into()))
            })
            .unwrap_err();
        assert!(matches!(err, SettleError::Internal(_)));

        // Both writes rolled back, the earlier commit untouched.
        store
            .transaction(|tx| {
                assert_eq!(tx.balance(UserId(1), TokenId(1)), BigUint::from(100u32));
                assert_eq!(tx.balance(UserId(2), TokenId(1)), BigUint::ZERO);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn transactions_serialize_across_threads() {
        use std::sync::Arc;

        let store = Arc::new(Store::new());
        store
            .transaction(|tx| {
                tx.set_balance(UserId(1), TokenId(1), BigUint::ZERO);
                Ok(())
            })
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for _ in 0..50 {
                    store
                        .transaction(|tx| {
                            let current = tx.balance(UserId(1), TokenId(1));
                            tx.set_balance(UserId(1), TokenId(1), current + 1u32);
                            Ok(())
                        })
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let total = store
            .transaction(|tx| Ok(tx.balance(UserId(1), TokenId(1))))
            .unwrap();
        assert_eq!(total, BigUint::from(400u32));
    }
}
