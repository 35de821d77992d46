//! Orders Domain - Export Orders and Financial Calculation
//!
//! This crate implements the commercial side of the export pipeline:
//!
//! - **Export orders** with their item lists and a small status state machine
//!   (`draft → confirmed → processing → shipped → delivered`, cancellable from
//!   any non-terminal state)
//! - The **calculation engine** that turns line items into
//!   subtotal / IGST / Duty Drawback / RODTEP / total figures
//! - **Purchase orders**, the supplier-facing mirror of an order (plain tax,
//!   no export incentives)
//!
//! # Export incentive math
//!
//! Exports under bond/LUT are zero-rated for IGST. Duty Drawback refunds the
//! import duties embedded in exported goods, and RODTEP remits other duties
//! and taxes; both are credited to the exporter and therefore *reduce* the
//! receivable total:
//!
//! ```text
//! total = subtotal + igst - drawback - rodtep
//! ```
//!
//! Every component is rounded to two decimals independently before the final
//! sum. See [`calculation`] for why that quirk is load-bearing.

pub mod order;
pub mod calculation;
pub mod master;
pub mod purchase_order;
pub mod error;

pub use master::{Customer, Product};
pub use order::{Order, OrderItem, OrderStatus};
pub use calculation::{ExportRates, OrderTotals, calculate_order_totals};
pub use purchase_order::{
    calculate_purchase_totals, PurchaseOrder, PurchaseOrderItem, PurchaseOrderStatus,
    PurchaseTotals,
};
pub use error::OrderError;
