//! # opensettle-types
//!
//! Shared types, errors, and configuration for the **OpenSettle**
//! settlement core.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`UserId`], [`TokenId`], [`OrderId`], [`TradeId`]
//! - **Amounts**: arbitrary-precision quantities ([`amount`])
//! - **Order model**: [`Order`], [`NewOrder`], [`OrderSide`], [`OrderStatus`]
//! - **Trade model**: [`Trade`], [`NewTrade`]
//! - **Token model**: [`Token`], [`NewToken`]
//! - **Balance model**: [`Balance`]
//! - **Request boundary**: payload types with validation ([`payload`])
//! - **Configuration**: [`ServiceConfig`]
//! - **Errors**: [`SettleError`] with `OS_ERR_` prefix codes and the
//!   [`ErrorKind`] response taxonomy

pub mod amount;
pub mod balance;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod order;
pub mod payload;
pub mod token;
pub mod trade;

// Re-export all primary types at crate root for ergonomic imports:
//   use opensettle_types::{Order, OrderSide, Trade, SettleError, ...};

pub use balance::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use order::*;
pub use payload::*;
pub use token::*;
pub use trade::*;

// Constants are accessed via `opensettle_types::constants::FOO`
// (not re-exported to avoid name collisions).
