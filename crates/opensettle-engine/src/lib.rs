//! # opensettle-engine
//!
//! The settlement engine for OpenSettle: composes the balance ledger and
//! order book store into the four user-facing operations — place, list,
//! execute, cancel — plus token issuance, each running as one
//! all-or-nothing transaction.
//!
//! ## Architecture
//!
//! - [`SettlementEngine`]: the transaction-scoped settlement protocol
//! - [`TokenMint`]: capability boundary to the external issuance ledger
//!   ([`LocalMint`] stands in for development and tests)
//! - [`SessionAuthority`]: capability boundary to the external identity
//!   collaborator ([`StaticSessions`] stands in)
//!
//! ## Operation flow
//!
//! ```text
//! boundary -> SessionAuthority.authenticate() -> payload.validate()
//!          -> SettlementEngine op -> Store::transaction { ledger + book }
//!          -> commit | rollback -> response (ErrorKind mapping)
//! ```

pub mod engine;
pub mod mint;
pub mod session;

pub use engine::SettlementEngine;
pub use mint::{LocalMint, TokenMint};
pub use session::{SessionAuthority, StaticSessions};
