//! End-to-end render tests against real files in a temp directory

use std::collections::HashMap;
use std::fs::File;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{Currency, CustomerId, ProductId};
use domain_documents::{BankDetails, Invoice, InvoiceType, PackingList, PackingListItem};
use domain_orders::{Customer, ExportRates, Order, OrderItem, Product};
use render_engine::{
    CompanyProfile, DocumentData, DocumentRenderer, OutputFormat, RenderOptions,
};

fn bank() -> BankDetails {
    BankDetails {
        bank_name: "HDFC Bank".to_string(),
        account_number: "50100012345678".to_string(),
        swift_code: "HDFCINBB".to_string(),
        ifsc_code: "HDFC0000001".to_string(),
        branch: None,
    }
}

fn customer() -> Customer {
    Customer::new("Nairobi Medical Supplies Ltd", "PO Box 45221, Mombasa Road", "Kenya")
        .unwrap()
        .with_city("Nairobi")
}

fn catalogue(product_id: ProductId) -> HashMap<ProductId, Product> {
    let mut product = Product::new("Amoxicillin", "capsules")
        .unwrap()
        .with_form("Capsules", "250 mg")
        .with_hsn("30042020");
    product.id = product_id;
    HashMap::from([(product_id, product)])
}

fn invoice() -> Invoice {
    let mut order = Order::new(
        "ORD-2025-00001",
        CustomerId::new(),
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        Currency::USD,
    );
    order
        .set_items(
            vec![
                OrderItem::new(ProductId::new(), dec!(1000), dec!(0.05))
                    .with_batch("AMX24101", NaiveDate::from_ymd_opt(2027, 10, 31).unwrap()),
            ],
            &ExportRates::default(),
        )
        .unwrap();
    Invoice::from_order("PI-2025-00001", InvoiceType::Proforma, &order, bank())
        .with_terms("Payment within 30 days of bill of lading date.")
}

fn invoice_data() -> DocumentData {
    let invoice = invoice();
    let customer = customer();
    let products = catalogue(invoice.items[0].product_id);
    DocumentData::from_invoice(
        &invoice,
        Some(&customer),
        &products,
        &ExportRates::default(),
        CompanyProfile::default(),
    )
}

#[test]
fn default_render_produces_pdf_and_excel_pair() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = DocumentRenderer::new(dir.path()).unwrap();

    let rendered = renderer
        .render(&invoice_data(), &RenderOptions::default())
        .unwrap();

    assert_eq!(rendered.files.len(), 2);
    let pdf = rendered.path_for(OutputFormat::Pdf).unwrap();
    let xlsx = rendered.path_for(OutputFormat::Excel).unwrap();
    assert!(pdf.exists() && pdf.metadata().unwrap().len() > 0);
    assert!(xlsx.exists() && xlsx.metadata().unwrap().len() > 0);
}

#[test]
fn html_carries_the_entity_figures_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = DocumentRenderer::new(dir.path()).unwrap();

    let rendered = renderer
        .render(
            &invoice_data(),
            &RenderOptions::default().with_format(OutputFormat::Html),
        )
        .unwrap();
    let html =
        std::fs::read_to_string(rendered.path_for(OutputFormat::Html).unwrap()).unwrap();

    // the reference figure block: 1000 x 0.05 at default rates
    assert!(html.contains("USD 50.00"));
    assert!(html.contains("USD 0.60"));
    assert!(html.contains("USD 0.35"));
    assert!(html.contains("USD 49.05"));
    assert!(html.contains("PI-2025-00001"));
    assert!(html.contains("Amoxicillin 250 mg Capsules"));
    assert!(html.contains("PROFORMA"));
}

#[test]
fn repeated_renders_print_identical_figures() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = DocumentRenderer::new(dir.path()).unwrap();
    let data = invoice_data();
    let options = RenderOptions::default().with_format(OutputFormat::Html);

    let first = renderer.render(&data, &options).unwrap();
    let first_html =
        std::fs::read_to_string(first.path_for(OutputFormat::Html).unwrap()).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = renderer.render(&data, &options).unwrap();
    let second_html =
        std::fs::read_to_string(second.path_for(OutputFormat::Html).unwrap()).unwrap();

    for figure in ["USD 50.00", "USD 49.05"] {
        assert!(first_html.contains(figure));
        assert!(second_html.contains(figure));
    }
}

#[test]
fn missing_customer_renders_without_party_section() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = DocumentRenderer::new(dir.path()).unwrap();

    let invoice = invoice();
    let data = DocumentData::from_invoice(
        &invoice,
        None,
        &HashMap::new(),
        &ExportRates::default(),
        CompanyProfile::default(),
    );
    let rendered = renderer
        .render(&data, &RenderOptions::default().with_format(OutputFormat::Html))
        .unwrap();
    let html =
        std::fs::read_to_string(rendered.path_for(OutputFormat::Html).unwrap()).unwrap();

    assert!(!html.contains("Bill To"));
    assert!(html.contains("USD 49.05"));
}

#[test]
fn watermark_override_replaces_default() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = DocumentRenderer::new(dir.path()).unwrap();

    let rendered = renderer
        .render(
            &invoice_data(),
            &RenderOptions::default()
                .with_format(OutputFormat::Html)
                .with_watermark("DUPLICATE"),
        )
        .unwrap();
    let html =
        std::fs::read_to_string(rendered.path_for(OutputFormat::Html).unwrap()).unwrap();

    assert!(html.contains("DUPLICATE"));
    assert!(!html.contains("class=\"watermark\">PROFORMA<"));
}

#[test]
fn packing_list_renders_weights_not_prices() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = DocumentRenderer::new(dir.path()).unwrap();

    let product_id = ProductId::new();
    let packing_list = PackingList::new(
        "PL-2025-00001",
        core_kernel::OrderId::new(),
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
    )
    .with_items(vec![
        PackingListItem::new(product_id, dec!(1000), 4, dec!(10), dec!(11.5))
            .with_batch("AMX24101", NaiveDate::from_ymd_opt(2027, 10, 31).unwrap()),
    ]);
    let customer = customer();
    let data = DocumentData::from_packing_list(
        &packing_list,
        Some(&customer),
        &catalogue(product_id),
        Currency::USD,
        CompanyProfile::default(),
    );

    let rendered = renderer
        .render(&data, &RenderOptions::default().with_format(OutputFormat::Html))
        .unwrap();
    let html =
        std::fs::read_to_string(rendered.path_for(OutputFormat::Html).unwrap()).unwrap();

    assert!(html.contains("Gross kg"));
    assert!(html.contains("Total Packages"));
    assert!(!html.contains("Unit Price"));
}

#[test]
fn empty_document_number_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = DocumentRenderer::new(dir.path()).unwrap();

    let mut data = invoice_data();
    data.number = String::new();
    assert!(renderer.render(&data, &RenderOptions::default()).is_err());
}

#[test]
fn bulk_export_skips_failures_and_archives_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = DocumentRenderer::new(dir.path()).unwrap();

    let good_a = invoice_data();
    let mut bad = invoice_data();
    bad.number = String::new();
    let mut good_b = invoice_data();
    good_b.number = "PI-2025-00002".to_string();

    let report = renderer
        .render_bulk(
            &[good_a, bad, good_b],
            &RenderOptions::default().with_format(OutputFormat::Pdf),
            "proforma-batch",
        )
        .unwrap();

    assert_eq!(report.generated.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert!(!report.is_complete());
    assert!(report.archive_path.exists());

    let archive = zip::ZipArchive::new(File::open(&report.archive_path).unwrap()).unwrap();
    assert_eq!(archive.len(), 2);
}

#[test]
fn bulk_export_of_empty_batch_still_yields_archive() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = DocumentRenderer::new(dir.path()).unwrap();

    let report = renderer
        .render_bulk(&[], &RenderOptions::default(), "empty-batch")
        .unwrap();
    assert!(report.archive_path.exists());
    assert!(report.generated.is_empty());
    assert!(report.is_complete());
}
