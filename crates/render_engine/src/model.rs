//! Renderer view model
//!
//! [`DocumentData`] is the single input shape all three output formats read.
//! Hydration from the domain entities happens in the constructors here, so
//! the format modules never touch repositories or entity internals. A
//! missing counterparty or an unresolvable product reference degrades to an
//! omitted section or a placeholder description; rendering never fails over
//! incomplete master data.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use core_kernel::{Currency, Money, ProductId};
use domain_documents::{BankDetails, DocumentType, Invoice, InvoiceStatus, InvoiceType, PackingList};
use domain_orders::{Customer, ExportRates, Product, PurchaseOrder, PurchaseOrderStatus};

/// The exporting company's letterhead block
#[derive(Debug, Clone, Serialize)]
pub struct CompanyProfile {
    pub name: String,
    pub address_lines: Vec<String>,
    /// GST registration
    pub gstin: String,
    /// Import Export Code
    pub iec: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: "Meridian Pharma Exports Pvt Ltd".to_string(),
            address_lines: vec![
                "Plot 14, Pharma SEZ, Andheri East".to_string(),
                "Mumbai 400093, Maharashtra, India".to_string(),
            ],
            gstin: "27AABCM1234F1Z5".to_string(),
            iec: "0312045678".to_string(),
            email: Some("exports@meridianpharma.example".to_string()),
            phone: None,
        }
    }
}

/// The counterparty block (customer or supplier)
#[derive(Debug, Clone, Serialize)]
pub struct PartyBlock {
    pub name: String,
    pub address_lines: Vec<String>,
    pub country: String,
    pub contact: Option<String>,
}

impl From<&Customer> for PartyBlock {
    fn from(customer: &Customer) -> Self {
        let mut address_lines = vec![customer.address.clone()];
        if let Some(city) = &customer.city {
            address_lines.push(city.clone());
        }
        Self {
            name: customer.name.clone(),
            address_lines,
            country: customer.country.clone(),
            contact: customer.email.clone(),
        }
    }
}

/// One printable line item
///
/// Commercial documents fill `unit_price`/`amount`; packing lists fill the
/// package and weight columns instead.
#[derive(Debug, Clone, Serialize)]
pub struct ItemRow {
    pub description: String,
    pub hsn_code: Option<String>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub quantity: Decimal,
    pub unit_price: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub packages: Option<u32>,
    pub net_weight_kg: Option<Decimal>,
    pub gross_weight_kg: Option<Decimal>,
}

/// How a totals line combines into the grand total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TotalKind {
    /// Sum of line amounts
    Subtotal,
    /// Added to the total; `rate` lets the spreadsheet express it as a formula
    Charge { rate: Option<Decimal> },
    /// Subtracted from the total (export incentive credits)
    Credit { rate: Option<Decimal> },
    GrandTotal,
}

/// One line in the totals block, printed in order
#[derive(Debug, Clone, Serialize)]
pub struct TotalLine {
    pub label: String,
    pub amount: Money,
    pub kind: TotalKind,
}

impl TotalLine {
    fn new(label: &str, amount: Money, kind: TotalKind) -> Self {
        Self {
            label: label.to_string(),
            amount,
            kind,
        }
    }
}

/// Everything a format module needs to emit one document
#[derive(Debug, Clone)]
pub struct DocumentData {
    pub document_type: DocumentType,
    /// Printed heading, e.g. "COMMERCIAL INVOICE"
    pub title: String,
    pub number: String,
    pub date: NaiveDate,
    pub currency: Currency,
    /// Amount encoded in the verification QR; zero for packing lists
    pub headline_amount: Money,
    /// Watermark used when the caller does not override it; empty = none
    pub default_watermark: String,
    pub company: CompanyProfile,
    /// Heading over the counterparty block ("Bill To", "Consignee", "Supplier")
    pub party_label: String,
    pub party: Option<PartyBlock>,
    pub items: Vec<ItemRow>,
    pub totals: Vec<TotalLine>,
    /// Non-monetary footer lines (package counts, weights, shipping marks)
    pub summary: Vec<(String, String)>,
    pub bank: Option<BankDetails>,
    pub terms: Option<String>,
}

impl DocumentData {
    pub(crate) fn validate(&self) -> Result<(), crate::error::RenderError> {
        if self.number.trim().is_empty() {
            return Err(crate::error::RenderError::invalid(
                "Document number is empty",
            ));
        }
        Ok(())
    }

    /// Hydrates renderer input from an invoice
    ///
    /// `rates` are only used to express incentive lines as spreadsheet
    /// formulas; the printed amounts always come from the invoice's frozen
    /// figure block.
    pub fn from_invoice(
        invoice: &Invoice,
        customer: Option<&Customer>,
        products: &HashMap<ProductId, Product>,
        rates: &ExportRates,
        company: CompanyProfile,
    ) -> Self {
        let items = invoice
            .items
            .iter()
            .map(|item| {
                let (description, hsn_code) = describe_product(products, item.product_id);
                ItemRow {
                    description,
                    hsn_code,
                    batch_number: item.batch_number.clone(),
                    expiry_date: item.expiry_date,
                    quantity: item.quantity,
                    unit_price: Some(item.unit_price),
                    amount: Some(item.line_total()),
                    packages: None,
                    net_weight_kg: None,
                    gross_weight_kg: None,
                }
            })
            .collect();

        let totals = vec![
            TotalLine::new("Subtotal", invoice.totals.subtotal, TotalKind::Subtotal),
            TotalLine::new(
                "IGST",
                invoice.totals.igst,
                TotalKind::Charge {
                    rate: Some(rates.igst.as_decimal()),
                },
            ),
            TotalLine::new(
                "Duty Drawback",
                invoice.totals.drawback,
                TotalKind::Credit {
                    rate: Some(rates.drawback.as_decimal()),
                },
            ),
            TotalLine::new(
                "RODTEP",
                invoice.totals.rodtep,
                TotalKind::Credit {
                    rate: Some(rates.rodtep.as_decimal()),
                },
            ),
            TotalLine::new("Total", invoice.totals.total_amount, TotalKind::GrandTotal),
        ];

        let title = match invoice.invoice_type {
            InvoiceType::Proforma => "PROFORMA INVOICE",
            InvoiceType::PreShipment => "PRE-SHIPMENT INVOICE",
            InvoiceType::PostShipment => "COMMERCIAL INVOICE",
        };
        let default_watermark = if invoice.status == InvoiceStatus::Cancelled {
            "CANCELLED".to_string()
        } else {
            invoice.invoice_type.watermark_label().to_string()
        };

        Self {
            document_type: DocumentType::Invoice,
            title: title.to_string(),
            number: invoice.invoice_number.clone(),
            date: invoice.invoice_date,
            currency: invoice.currency,
            headline_amount: invoice.totals.total_amount,
            default_watermark,
            company,
            party_label: "Bill To".to_string(),
            party: customer.map(PartyBlock::from),
            items,
            totals,
            summary: Vec::new(),
            bank: Some(invoice.bank_details.clone()),
            terms: invoice.terms.clone(),
        }
    }

    /// Hydrates renderer input from a packing list
    ///
    /// The order's currency is passed separately because packing lists carry
    /// no commercial figures of their own.
    pub fn from_packing_list(
        packing_list: &PackingList,
        customer: Option<&Customer>,
        products: &HashMap<ProductId, Product>,
        currency: Currency,
        company: CompanyProfile,
    ) -> Self {
        let items = packing_list
            .items
            .iter()
            .map(|item| {
                let (description, hsn_code) = describe_product(products, item.product_id);
                ItemRow {
                    description,
                    hsn_code,
                    batch_number: item.batch_number.clone(),
                    expiry_date: item.expiry_date,
                    quantity: item.quantity,
                    unit_price: None,
                    amount: None,
                    packages: Some(item.packages),
                    net_weight_kg: Some(item.net_weight_kg),
                    gross_weight_kg: Some(item.gross_weight_kg),
                }
            })
            .collect();

        let mut summary = vec![
            (
                "Total Packages".to_string(),
                packing_list.total_packages().to_string(),
            ),
            (
                "Total Net Weight".to_string(),
                format!("{} kg", packing_list.total_net_weight_kg()),
            ),
            (
                "Total Gross Weight".to_string(),
                format!("{} kg", packing_list.total_gross_weight_kg()),
            ),
        ];
        if let Some(marks) = &packing_list.shipping_marks {
            summary.push(("Shipping Marks".to_string(), marks.clone()));
        }

        Self {
            document_type: DocumentType::PackingList,
            title: "PACKING LIST".to_string(),
            number: packing_list.packing_list_number.clone(),
            date: packing_list.date,
            currency,
            headline_amount: Money::zero(currency),
            default_watermark: String::new(),
            company,
            party_label: "Consignee".to_string(),
            party: customer.map(PartyBlock::from),
            items,
            totals: Vec::new(),
            summary,
            bank: None,
            terms: packing_list.notes.clone(),
        }
    }

    /// Hydrates renderer input from a purchase order
    pub fn from_purchase_order(
        purchase_order: &PurchaseOrder,
        products: &HashMap<ProductId, Product>,
        company: CompanyProfile,
    ) -> Self {
        let items = purchase_order
            .items
            .iter()
            .map(|item| {
                let (description, hsn_code) = describe_product(products, item.product_id);
                ItemRow {
                    description,
                    hsn_code,
                    batch_number: None,
                    expiry_date: None,
                    quantity: item.quantity,
                    unit_price: Some(item.unit_price),
                    amount: Some(item.line_total()),
                    packages: None,
                    net_weight_kg: None,
                    gross_weight_kg: None,
                }
            })
            .collect();

        let totals = vec![
            TotalLine::new(
                "Subtotal",
                purchase_order.totals.subtotal,
                TotalKind::Subtotal,
            ),
            TotalLine::new(
                "GST",
                purchase_order.totals.tax,
                TotalKind::Charge {
                    rate: Some(purchase_order.tax_rate.as_decimal()),
                },
            ),
            TotalLine::new(
                "Total",
                purchase_order.totals.total,
                TotalKind::GrandTotal,
            ),
        ];

        let supplier = PartyBlock {
            name: purchase_order.supplier_name.clone(),
            address_lines: purchase_order
                .supplier_address
                .clone()
                .map(|a| vec![a])
                .unwrap_or_default(),
            country: "India".to_string(),
            contact: None,
        };
        let default_watermark = match purchase_order.status {
            PurchaseOrderStatus::Draft => "DRAFT".to_string(),
            PurchaseOrderStatus::Cancelled => "CANCELLED".to_string(),
            _ => String::new(),
        };

        Self {
            document_type: DocumentType::PurchaseOrder,
            title: "PURCHASE ORDER".to_string(),
            number: purchase_order.po_number.clone(),
            date: purchase_order.ordered_at,
            currency: purchase_order.currency,
            headline_amount: purchase_order.totals.total,
            default_watermark,
            company,
            party_label: "Supplier".to_string(),
            party: Some(supplier),
            items,
            totals,
            summary: Vec::new(),
            bank: None,
            terms: None,
        }
    }
}

/// Amount formatting shared by all formats; built-in PDF fonts are
/// WinAnsi-only, so the ISO code is used instead of currency symbols
pub(crate) fn format_amount(currency: Currency, amount: Decimal) -> String {
    format!("{} {:.2}", currency.code(), amount)
}

fn describe_product(
    products: &HashMap<ProductId, Product>,
    product_id: ProductId,
) -> (String, Option<String>) {
    match products.get(&product_id) {
        Some(product) => (product.display_name(), product.hsn_code.clone()),
        // tolerate stale references instead of refusing to render
        None => (format!("Product {product_id}"), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::CustomerId;
    use domain_orders::{Order, OrderItem};
    use rust_decimal_macros::dec;

    fn invoice() -> Invoice {
        let mut order = Order::new(
            "ORD-2025-00001",
            CustomerId::new(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            Currency::USD,
        );
        order
            .set_items(
                vec![OrderItem::new(ProductId::new(), dec!(1000), dec!(0.05))],
                &ExportRates::default(),
            )
            .unwrap();
        Invoice::from_order(
            "PI-2025-00001",
            InvoiceType::Proforma,
            &order,
            BankDetails {
                bank_name: "HDFC Bank".to_string(),
                account_number: "50100012345678".to_string(),
                swift_code: "HDFCINBB".to_string(),
                ifsc_code: "HDFC0000001".to_string(),
                branch: None,
            },
        )
    }

    #[test]
    fn test_invoice_hydration_copies_frozen_figures() {
        let data = DocumentData::from_invoice(
            &invoice(),
            None,
            &HashMap::new(),
            &ExportRates::default(),
            CompanyProfile::default(),
        );

        assert_eq!(data.totals.len(), 5);
        assert_eq!(data.totals[0].amount.amount(), dec!(50.00));
        assert_eq!(data.totals[4].amount.amount(), dec!(49.05));
        assert_eq!(data.default_watermark, "PROFORMA");
        assert!(data.party.is_none());
    }

    #[test]
    fn test_unresolved_product_degrades_to_placeholder() {
        let data = DocumentData::from_invoice(
            &invoice(),
            None,
            &HashMap::new(),
            &ExportRates::default(),
            CompanyProfile::default(),
        );
        assert!(data.items[0].description.starts_with("Product PRD-"));
    }

    #[test]
    fn test_resolved_product_uses_display_name() {
        let invoice = invoice();
        let product_id = invoice.items[0].product_id;
        let mut products = HashMap::new();
        let mut product = Product::new("Amoxicillin", "capsules")
            .unwrap()
            .with_form("Capsules", "250 mg")
            .with_hsn("30042020");
        product.id = product_id;
        products.insert(product_id, product);

        let data = DocumentData::from_invoice(
            &invoice,
            None,
            &products,
            &ExportRates::default(),
            CompanyProfile::default(),
        );
        assert_eq!(data.items[0].description, "Amoxicillin 250 mg Capsules");
        assert_eq!(data.items[0].hsn_code.as_deref(), Some("30042020"));
    }

    #[test]
    fn test_amount_formatting_uses_iso_codes() {
        assert_eq!(format_amount(Currency::USD, dec!(49.05)), "USD 49.05");
        assert_eq!(format_amount(Currency::INR, dec!(100)), "INR 100.00");
    }
}
