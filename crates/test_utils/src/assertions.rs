//! Domain Assertion Helpers
//!
//! Assertions that print the whole offending value on failure instead of a
//! bare left/right pair.

use rust_decimal::Decimal;

use core_kernel::Money;
use domain_orders::OrderTotals;

/// Asserts a monetary amount, ignoring the currency
pub fn assert_money_eq(actual: Money, expected: Decimal) {
    assert_eq!(
        actual.amount(),
        expected,
        "expected {} {}, got {}",
        expected,
        actual.currency().code(),
        actual
    );
}

/// Asserts the full figure block of an order in one call
pub fn assert_totals(
    totals: &OrderTotals,
    subtotal: Decimal,
    igst: Decimal,
    drawback: Decimal,
    rodtep: Decimal,
    total_amount: Decimal,
) {
    assert_money_eq(totals.subtotal, subtotal);
    assert_money_eq(totals.igst, igst);
    assert_money_eq(totals.drawback, drawback);
    assert_money_eq(totals.rodtep, rodtep);
    assert_money_eq(totals.total_amount, total_amount);
}
