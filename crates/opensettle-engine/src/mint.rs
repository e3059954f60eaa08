//! Issuance boundary.
//!
//! Minting the initial supply happens on an external ledger; the engine
//! only depends on the side effect through [`TokenMint`]. A real chain
//! client belongs to its own crate — in-tree, [`LocalMint`] stands in by
//! fabricating an opaque contract reference.

use num_bigint::BigUint;
use opensettle_types::Result;
use uuid::Uuid;

/// Capability to mint a token's initial supply on the external ledger.
///
/// The engine calls this exactly once per issuance, before writing any
/// token or balance row; a `MintRejected` error aborts the enclosing
/// transaction so nothing commits.
pub trait TokenMint {
    /// Perform the mint side effect and return the contract reference the
    /// token row records.
    fn mint_initial_supply(
        &self,
        name: &str,
        symbol: &str,
        initial_supply: &BigUint,
    ) -> Result<String>;
}

/// Stand-in minter for development and tests: always succeeds and issues a
/// fresh opaque contract reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalMint;

impl TokenMint for LocalMint {
    fn mint_initial_supply(
        &self,
        _name: &str,
        _symbol: &str,
        _initial_supply: &BigUint,
    ) -> Result<String> {
        Ok(Uuid::new_v4().to_string())
    }
}
