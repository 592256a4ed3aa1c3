use thiserror::Error;

use crate::instrument::Symbol;

/// Failures that can occur validating an [`crate::orders::OrderSpec`] before
/// it is ever handed to a book. Rejected before any event is emitted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderValidationError {
    #[error("order quantity must be greater than zero")]
    ZeroQuantity,
    #[error("limit order price must be greater than zero")]
    NonPositiveLimitPrice,
}

/// Failures surfaced to the caller of `Engine::submit`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown symbol: {0}")]
    UnknownSymbol(Symbol),
    #[error("invalid order: {0}")]
    InvalidOrder(#[from] OrderValidationError),
}
