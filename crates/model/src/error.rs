//! The one error type every order check reports.

use {number::Amount, strum::Display};

/// Which leverage bound an order broke.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[strum(serialize_all = "kebab-case")]
pub enum OverLeverageKind {
    /// Margin below `alpha * quantity * price`.
    ContractPrice,
    /// Index price below the long requirement.
    IndexPriceLong,
    /// Index price above the short requirement.
    IndexPriceShort,
}

/// Every way an order, market message or margin computation can fail.
///
/// The set is closed. A variant is a terminal verdict for the transaction
/// carrying the order; nothing here is retried.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("invalid address in {0}")]
    InvalidAddress(&'static str),
    #[error("no order specified")]
    MissingOrder,
    #[error("hash check failed: {0}")]
    HashComputationFailed(String),
    #[error("invalid signature")]
    InvalidSignature,
    #[error("insufficient quantity")]
    InsufficientQuantity,
    #[error("bad field: {0}")]
    BadField(String),
    #[error("order expiration {expiration} <= current time {current}")]
    OrderExpired { expiration: Amount, current: i64 },
    #[error("over leveraged order ({0})")]
    OverLeveragedOrder(OverLeverageKind),
    #[error("unrecognized order type")]
    UnrecognizedOrderType,
    #[error("division by zero")]
    DivisionByZero,
    #[error("failed to parse {0}")]
    ParseFailure(&'static str),
}
