//! Customer and product master data
//!
//! Thin records the rest of the system references by id. Orders keep only
//! the ids; document rendering looks the records up at generation time and
//! degrades gracefully when a reference cannot be resolved.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CustomerId, ProductId};

use crate::error::OrderError;

/// An overseas customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub address: String,
    pub city: Option<String>,
    pub country: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Destination-side tax registration, where the market requires one
    pub tax_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        country: impl Into<String>,
    ) -> Result<Self, OrderError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(OrderError::validation("Customer name cannot be empty"));
        }
        let now = Utc::now();
        Ok(Self {
            id: CustomerId::new_v7(),
            name,
            address: address.into(),
            city: None,
            country: country.into(),
            email: None,
            phone: None,
            tax_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn with_contact(mut self, email: Option<String>, phone: Option<String>) -> Self {
        self.email = email;
        self.phone = phone;
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }
}

/// A pharmaceutical product in the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// HSN code used for customs classification on export paperwork
    pub hsn_code: Option<String>,
    /// Dosage form (tablet, capsule, syrup, ...)
    pub dosage_form: Option<String>,
    /// Strength label, e.g. "500 mg"
    pub strength: Option<String>,
    /// Unit the quantity is counted in, e.g. "tablets", "bottles"
    pub unit: String,
    /// Catalogue price used to prefill order lines; lines may override it
    pub default_unit_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Result<Self, OrderError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(OrderError::validation("Product name cannot be empty"));
        }
        let now = Utc::now();
        Ok(Self {
            id: ProductId::new_v7(),
            name,
            hsn_code: None,
            dosage_form: None,
            strength: None,
            unit: unit.into(),
            default_unit_price: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn with_hsn(mut self, hsn_code: impl Into<String>) -> Self {
        self.hsn_code = Some(hsn_code.into());
        self
    }

    pub fn with_form(mut self, dosage_form: impl Into<String>, strength: impl Into<String>) -> Self {
        self.dosage_form = Some(dosage_form.into());
        self.strength = Some(strength.into());
        self
    }

    pub fn with_default_price(mut self, price: Decimal) -> Self {
        self.default_unit_price = Some(price);
        self
    }

    /// Full description as printed on documents, e.g.
    /// "Amoxicillin 500 mg Capsules"
    pub fn display_name(&self) -> String {
        let mut parts = vec![self.name.clone()];
        if let Some(strength) = &self.strength {
            parts.push(strength.clone());
        }
        if let Some(form) = &self.dosage_form {
            parts.push(form.clone());
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display_name_composes_available_parts() {
        let product = Product::new("Amoxicillin", "capsules")
            .unwrap()
            .with_form("Capsules", "500 mg")
            .with_hsn("30042020");
        assert_eq!(product.display_name(), "Amoxicillin 500 mg Capsules");

        let bare = Product::new("Paracetamol", "tablets").unwrap();
        assert_eq!(bare.display_name(), "Paracetamol");
    }

    #[test]
    fn test_blank_names_rejected() {
        assert!(Customer::new("  ", "12 Harbour Rd", "Kenya").is_err());
        assert!(Product::new("", "tablets").is_err());
    }

    #[test]
    fn test_default_price_is_optional() {
        let product = Product::new("Cefixime", "tablets")
            .unwrap()
            .with_default_price(dec!(0.18));
        assert_eq!(product.default_unit_price, Some(dec!(0.18)));
    }
}
