//! Token model.
//!
//! A token row is created once at issuance, after the external ledger's
//! "mint initial supply" side effect has succeeded, and is immutable
//! thereafter. The `contract_address` is an opaque reference into that
//! external ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{TokenId, UserId};

/// An issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    /// Opaque reference to the external issuance ledger.
    pub contract_address: String,
    pub name: String,
    pub symbol: String,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Fields of a token about to be inserted. The store assigns the id and
/// stamps `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToken {
    pub contract_address: String,
    pub name: String,
    pub symbol: String,
    pub owner_id: UserId,
}
