//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common entities. Fixtures are consistent and
//! predictable so assertions can use literal expected values.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money};
use domain_documents::BankDetails;
use domain_orders::{Customer, ExportRates, Product};

/// The bank details stamped on fixture invoices
pub static STANDARD_BANK: Lazy<BankDetails> = Lazy::new(|| BankDetails {
    bank_name: "State Bank of India".to_string(),
    account_number: "00000012345678".to_string(),
    swift_code: "SBININBB104".to_string(),
    ifsc_code: "SBIN0000300".to_string(),
    branch: Some("Fort, Mumbai".to_string()),
});

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }

    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// An INR amount for currency mismatch tests
    pub fn inr_100() -> Money {
        Money::new(dec!(100.00), Currency::INR)
    }

    /// An amount whose half-up rounding differs from banker's rounding
    pub fn usd_midpoint() -> Money {
        Money::new(dec!(2.345), Currency::USD)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard order date (Mar 1, 2025)
    pub fn order_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date")
    }

    /// A batch expiry comfortably in the future
    pub fn batch_expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2027, 10, 31).expect("valid date")
    }
}

/// A customer in a typical export market
pub fn customer() -> Customer {
    Customer::new("Lagos Pharma Distributors", "21 Broad Street", "Nigeria")
        .expect("fixture customer is valid")
        .with_city("Lagos")
        .with_contact(Some("purchasing@lagospharma.example".to_string()), None)
}

/// A catalogue product with HSN code and strength
pub fn product() -> Product {
    Product::new("Amoxicillin", "capsules")
        .expect("fixture product is valid")
        .with_form("Capsules", "250 mg")
        .with_hsn("30042020")
        .with_default_price(dec!(0.05))
}

/// The rates in force for fixture orders: zero-rated IGST, 1.2% drawback,
/// 0.7% RODTEP
pub fn export_rates() -> ExportRates {
    ExportRates::default()
}
