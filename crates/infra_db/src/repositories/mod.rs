//! Repositories
//!
//! One repository per aggregate, each a thin struct over the shared pool.
//! Rows are mapped by hand: amounts and UUIDs live in TEXT columns, item
//! lists and bank details in JSON columns, and a value that fails to parse
//! back surfaces as [`DatabaseError::Corrupt`] rather than a panic.

mod customers;
mod filings;
mod invoices;
mod orders;
mod packing_lists;
mod products;
mod purchase_orders;
mod versions;

pub use customers::CustomerRepository;
pub use filings::FilingRepository;
pub use invoices::InvoiceRepository;
pub use orders::OrderRepository;
pub use packing_lists::PackingListRepository;
pub use products::ProductRepository;
pub use purchase_orders::PurchaseOrderRepository;
pub use versions::SqliteVersionLog;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use core_kernel::{Currency, Money};

use crate::error::DatabaseError;

pub(crate) fn parse_decimal(table: &'static str, value: &str) -> Result<Decimal, DatabaseError> {
    value
        .parse()
        .map_err(|_| DatabaseError::corrupt(table, format!("bad decimal: {value}")))
}

pub(crate) fn parse_uuid(table: &'static str, value: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(value).map_err(|_| DatabaseError::corrupt(table, format!("bad uuid: {value}")))
}

pub(crate) fn parse_money(
    table: &'static str,
    amount: &str,
    currency: Currency,
) -> Result<Money, DatabaseError> {
    Ok(Money::new(parse_decimal(table, amount)?, currency))
}

pub(crate) fn parse_enum<T>(table: &'static str, value: &str) -> Result<T, DatabaseError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| DatabaseError::corrupt(table, e.to_string()))
}

pub(crate) fn parse_json<T: DeserializeOwned>(
    table: &'static str,
    value: &str,
) -> Result<T, DatabaseError> {
    serde_json::from_str(value).map_err(|e| DatabaseError::corrupt(table, e.to_string()))
}

pub(crate) fn to_json<T: Serialize>(table: &'static str, value: &T) -> Result<String, DatabaseError> {
    serde_json::to_string(value).map_err(|e| DatabaseError::corrupt(table, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert!(parse_decimal("orders", "49.05").is_ok());
        let err = parse_decimal("orders", "forty-nine").unwrap_err();
        assert!(matches!(err, DatabaseError::Corrupt { table: "orders", .. }));
    }

    #[test]
    fn test_parse_money_carries_currency() {
        let money = parse_money("orders", "49.05", Currency::USD).unwrap();
        assert_eq!(money.currency(), Currency::USD);
    }
}
