//! Error types for the OpenSettle settlement core.
//!
//! All errors use the `OS_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order errors
//! - 2xx: Balance errors
//! - 3xx: Token / issuance errors
//! - 4xx: Session errors
//! - 9xx: General / internal errors

use num_bigint::BigUint;
use thiserror::Error;

use crate::{OrderId, OrderStatus, TokenId, UserId};

/// Central error enum for all OpenSettle operations.
#[derive(Debug, Error)]
pub enum SettleError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// The requested order does not exist.
    #[error("OS_ERR_100: Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The order payload failed validation (zero amount/price, bad values).
    #[error("OS_ERR_101: Invalid order: {reason}")]
    InvalidOrder { reason: String },

    /// The order is in a terminal state and permits no further transitions.
    #[error("OS_ERR_102: Order {id} is {status}, not open")]
    OrderNotOpen { id: OrderId, status: OrderStatus },

    /// The acting user does not own the order.
    #[error("OS_ERR_103: {user} is not the owner of {id}")]
    NotOrderOwner { id: OrderId, user: UserId },

    // =================================================================
    // Balance Errors (2xx)
    // =================================================================
    /// Not enough balance to escrow or settle.
    #[error("OS_ERR_200: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: BigUint, available: BigUint },

    // =================================================================
    // Token / Issuance Errors (3xx)
    // =================================================================
    /// The requested token does not exist.
    #[error("OS_ERR_300: Token not found: {0}")]
    TokenNotFound(TokenId),

    /// The issuance payload failed validation.
    #[error("OS_ERR_301: Invalid token: {reason}")]
    InvalidToken { reason: String },

    /// The external issuance ledger rejected the mint side effect.
    #[error("OS_ERR_302: Mint rejected: {reason}")]
    MintRejected { reason: String },

    // =================================================================
    // Session Errors (4xx)
    // =================================================================
    /// The bearer credential is missing, unknown, or revoked.
    #[error("OS_ERR_400: Unauthenticated: {reason}")]
    Unauthenticated { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable transaction/storage failure.
    #[error("OS_ERR_900: Internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SettleError>;

/// Stable classification of every failure, mapped by the caller-facing
/// boundary to a response without altering the transaction outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    InsufficientFunds,
    InvalidState,
    Unauthorized,
    Unauthenticated,
    Infrastructure,
}

impl ErrorKind {
    /// The HTTP status the transport boundary reports for this kind.
    #[must_use]
    pub fn status(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::Unauthenticated => 401,
            Self::Unauthorized => 403,
            Self::NotFound => 404,
            Self::InvalidState => 409,
            Self::InsufficientFunds => 422,
            Self::Infrastructure => 500,
        }
    }
}

impl SettleError {
    /// Classify this error for the response boundary.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidOrder { .. } | Self::InvalidToken { .. } => ErrorKind::Validation,
            Self::OrderNotFound(_) | Self::TokenNotFound(_) => ErrorKind::NotFound,
            Self::InsufficientBalance { .. } => ErrorKind::InsufficientFunds,
            Self::OrderNotOpen { .. } => ErrorKind::InvalidState,
            Self::NotOrderOwner { .. } => ErrorKind::Unauthorized,
            Self::Unauthenticated { .. } => ErrorKind::Unauthenticated,
            Self::MintRejected { .. } | Self::Internal(_) => ErrorKind::Infrastructure,
        }
    }
}
