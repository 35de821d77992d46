//! Order financial calculation engine
//!
//! This module converts order line items into the figure block that every
//! downstream document (invoice, packing list header, PDF/Excel/HTML render)
//! copies verbatim.
//!
//! # Rounding
//!
//! The legacy system rounded subtotal, IGST, drawback and RODTEP to two
//! decimals *independently* and then combined them. That is not true
//! compound rounding, and on some inputs it differs from rounding only the
//! final total by a cent. Historical documents carry those exact figures, so
//! the behavior is reproduced here bit-for-bit rather than "fixed".

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, Rate};

use crate::order::OrderItem;

/// Configured export incentive rates
///
/// Defaults match the rates the company operates under: IGST zero-rated
/// (exports under LUT), 1.2% Duty Drawback, 0.7% RODTEP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRates {
    /// IGST rate (0.00 for zero-rated exports under bond/LUT)
    pub igst: Rate,
    /// Duty Drawback rate
    pub drawback: Rate,
    /// RODTEP remission rate
    pub rodtep: Rate,
}

impl Default for ExportRates {
    fn default() -> Self {
        Self {
            igst: Rate::new(dec!(0.00)),
            drawback: Rate::new(dec!(0.012)),
            rodtep: Rate::new(dec!(0.007)),
        }
    }
}

impl ExportRates {
    pub fn new(igst: Decimal, drawback: Decimal, rodtep: Decimal) -> Self {
        Self {
            igst: Rate::new(igst),
            drawback: Rate::new(drawback),
            rodtep: Rate::new(rodtep),
        }
    }
}

/// The derived figure block of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of quantity x unit price across items
    pub subtotal: Money,
    /// IGST on the subtotal
    pub igst: Money,
    /// Duty Drawback credit (reduces the total)
    pub drawback: Money,
    /// RODTEP credit (reduces the total)
    pub rodtep: Money,
    /// subtotal + igst - drawback - rodtep
    pub total_amount: Money,
}

impl OrderTotals {
    /// Returns a zeroed figure block in the given currency
    pub fn zero(currency: Currency) -> Self {
        let zero = Money::zero(currency);
        Self {
            subtotal: zero,
            igst: zero,
            drawback: zero,
            rodtep: zero,
            total_amount: zero,
        }
    }

    /// Checks the combination invariant on already-rounded components
    pub fn is_consistent(&self) -> bool {
        self.total_amount
            == self.subtotal + self.igst - self.drawback - self.rodtep
    }
}

/// Calculates the financial figure block for a list of order items
///
/// Pure function of the items, the currency and the configured rates.
/// Each component is rounded to two decimals (half-up) before the final
/// combination; see the module docs for why.
pub fn calculate_order_totals(
    items: &[OrderItem],
    currency: Currency,
    rates: &ExportRates,
) -> OrderTotals {
    let raw_subtotal: Decimal = items
        .iter()
        .map(|item| item.quantity * item.unit_price)
        .sum();

    let subtotal = Money::new(raw_subtotal, currency).round_half_up();
    let igst = rates.igst.apply(&subtotal).round_half_up();
    let drawback = rates.drawback.apply(&subtotal).round_half_up();
    let rodtep = rates.rodtep.apply(&subtotal).round_half_up();
    let total_amount = subtotal + igst - drawback - rodtep;

    OrderTotals {
        subtotal,
        igst,
        drawback,
        rodtep,
        total_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ProductId;

    fn item(quantity: Decimal, unit_price: Decimal) -> OrderItem {
        OrderItem::new(ProductId::new(), quantity, unit_price)
    }

    #[test]
    fn test_reference_vector() {
        // 1000 tablets at $0.05: the canonical regression figures
        let rates = ExportRates::new(dec!(0), dec!(0.012), dec!(0.007));
        let totals = calculate_order_totals(
            &[item(dec!(1000), dec!(0.05))],
            Currency::USD,
            &rates,
        );

        assert_eq!(totals.subtotal.amount(), dec!(50.00));
        assert_eq!(totals.igst.amount(), dec!(0.00));
        assert_eq!(totals.drawback.amount(), dec!(0.60));
        assert_eq!(totals.rodtep.amount(), dec!(0.35));
        assert_eq!(totals.total_amount.amount(), dec!(49.05));
    }

    #[test]
    fn test_empty_items_yield_zero_block() {
        let totals = calculate_order_totals(&[], Currency::INR, &ExportRates::default());
        assert!(totals.subtotal.is_zero());
        assert!(totals.total_amount.is_zero());
        assert!(totals.is_consistent());
    }

    #[test]
    fn test_components_rounded_independently() {
        // subtotal 10.42: drawback 0.12504 -> 0.13, rodtep 0.07294 -> 0.07.
        // Compound rounding of the final total would give 10.22, matching
        // here only by coincidence of the figures; what matters is that the
        // stored components are the rounded ones.
        let rates = ExportRates::default();
        let totals =
            calculate_order_totals(&[item(dec!(1), dec!(10.42))], Currency::USD, &rates);

        assert_eq!(totals.drawback.amount(), dec!(0.13));
        assert_eq!(totals.rodtep.amount(), dec!(0.07));
        assert_eq!(totals.total_amount.amount(), dec!(10.22));
        assert!(totals.is_consistent());
    }

    #[test]
    fn test_nonzero_igst() {
        let rates = ExportRates::new(dec!(0.18), dec!(0), dec!(0));
        let totals =
            calculate_order_totals(&[item(dec!(10), dec!(10))], Currency::INR, &rates);

        assert_eq!(totals.subtotal.amount(), dec!(100.00));
        assert_eq!(totals.igst.amount(), dec!(18.00));
        assert_eq!(totals.total_amount.amount(), dec!(118.00));
    }
}
