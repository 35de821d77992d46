//! Request handlers

pub mod customers;
pub mod documents;
pub mod filings;
pub mod health;
pub mod invoices;
pub mod orders;
pub mod packing_lists;
pub mod products;
pub mod purchase_orders;
