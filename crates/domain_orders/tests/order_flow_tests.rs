//! Cross-module tests for the orders domain

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal_macros::dec;

use core_kernel::{Currency, ProductId, Rate};
use domain_orders::{
    calculate_order_totals, calculate_purchase_totals, ExportRates, Order, OrderItem,
    OrderStatus, PurchaseOrderItem,
};
use test_utils::{
    assert_totals, currency_strategy, order_items_strategy, rate_strategy, OrderBuilder,
};

#[test]
fn order_totals_match_engine_output_exactly() {
    let rates = ExportRates::default();
    let items = vec![
        (ProductId::new(), dec!(1000), dec!(0.05)),
        (ProductId::new(), dec!(500), dec!(0.12)),
    ];
    let order = OrderBuilder::new()
        .with_order_number("ORD-2025-00042")
        .with_items(items.clone())
        .build();

    let engine_items: Vec<OrderItem> = items
        .into_iter()
        .map(|(product_id, quantity, unit_price)| OrderItem::new(product_id, quantity, unit_price))
        .collect();
    let expected = calculate_order_totals(&engine_items, Currency::USD, &rates);

    assert_eq!(order.totals, expected);
    assert!(order.totals.is_consistent());
}

#[test]
fn default_rates_yield_the_legacy_figure_block() {
    let order = OrderBuilder::new().build();
    assert_totals(
        &order.totals,
        dec!(50.00),
        dec!(0.00),
        dec!(0.60),
        dec!(0.35),
        dec!(49.05),
    );
}

#[test]
fn cancelled_order_keeps_its_number_and_figures() {
    let mut order = OrderBuilder::new()
        .with_order_number("ORD-2025-00043")
        .with_currency(Currency::INR)
        .with_items(vec![(ProductId::new(), dec!(10), dec!(99.99))])
        .build();
    let totals_before = order.totals;

    order.confirm().unwrap();
    order.cancel().unwrap();

    assert_eq!(order.status, OrderStatus::Cancelled);
    assert_eq!(order.order_number, "ORD-2025-00043");
    assert_eq!(order.totals, totals_before);
}

#[test]
fn purchase_and_export_rounding_agree_on_the_subtotal() {
    let qty = dec!(333);
    let price = dec!(0.0333);

    let export = calculate_order_totals(
        &[OrderItem::new(ProductId::new(), qty, price)],
        Currency::USD,
        &ExportRates::default(),
    );
    let purchase = calculate_purchase_totals(
        &[PurchaseOrderItem::new(ProductId::new(), qty, price)],
        Currency::USD,
        Rate::new(dec!(0)),
    );

    assert_eq!(export.subtotal, purchase.subtotal);
}

#[test]
fn builder_line_items_land_on_the_order() {
    let product = ProductId::new();
    let order = OrderBuilder::new()
        .with_line(product, dec!(200), dec!(1.25))
        .build();
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[1].product_id, product);
    assert_eq!(
        order.ordered_at,
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    );
}

proptest! {
    /// Every figure is rounded on its own before combining, so the grand
    /// total must equal the sum of the already-rounded parts.
    #[test]
    fn totals_stay_consistent_for_arbitrary_orders(
        items in order_items_strategy(),
        currency in currency_strategy(),
        igst in rate_strategy(),
        drawback in rate_strategy(),
        rodtep in rate_strategy(),
    ) {
        let rates = ExportRates {
            igst: Rate::new(igst),
            drawback: Rate::new(drawback),
            rodtep: Rate::new(rodtep),
        };
        let totals = calculate_order_totals(&items, currency, &rates);

        prop_assert!(totals.is_consistent());
        let recombined = totals.subtotal.amount() + totals.igst.amount()
            - totals.drawback.amount()
            - totals.rodtep.amount();
        prop_assert_eq!(totals.total_amount.amount(), recombined);
    }

    #[test]
    fn draft_orders_accept_any_generated_item_set(items in order_items_strategy()) {
        let mut order = Order::new(
            "ORD-2025-99999",
            core_kernel::CustomerId::new(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            Currency::USD,
        );
        let count = items.len();
        prop_assert!(order.set_items(items, &ExportRates::default()).is_ok());
        prop_assert_eq!(order.items.len(), count);
        // tiny lines can round the subtotal down to zero, never below
        prop_assert!(!order.totals.subtotal.is_negative());
    }
}
