//! Orders domain error types

use thiserror::Error;
use core_kernel::MoneyError;

use crate::order::OrderStatus;

/// Errors that can occur in the orders domain
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order is in terminal status {0} and cannot be modified")]
    Terminal(OrderStatus),

    #[error("Order has no items")]
    EmptyOrder,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl OrderError {
    pub fn validation(message: impl Into<String>) -> Self {
        OrderError::Validation(message.into())
    }
}
