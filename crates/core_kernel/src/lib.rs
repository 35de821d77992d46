//! Core Kernel - Foundational types for the export documentation system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed identifiers and value objects

pub mod money;
pub mod identifiers;

pub use money::{Money, Currency, Rate, MoneyError};
pub use identifiers::{
    CustomerId, ProductId, OrderId, InvoiceId,
    PackingListId, PurchaseOrderId, FilingId,
};
