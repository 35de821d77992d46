//! Cross-module tests for the documents domain

use std::sync::Arc;

use domain_documents::{
    DocumentType, InMemorySequenceStore, InMemoryVersionLog, InvoiceType, NumberScope,
    NumberingRegistry, VersionStore,
};
use test_utils::{InvoiceBuilder, OrderBuilder, PackingListBuilder, STANDARD_BANK};

#[tokio::test]
async fn one_registry_numbers_all_document_kinds() {
    let registry = NumberingRegistry::new(Arc::new(InMemorySequenceStore::new()));
    let order = OrderBuilder::new().with_order_number("ORD-2025-00007").build();

    let pi_number = registry
        .next_number_for_year(NumberScope::Invoice(InvoiceType::Proforma), 2025)
        .await
        .unwrap();
    let pl_number = registry
        .next_number_for_year(NumberScope::PackingList, 2025)
        .await
        .unwrap();

    let invoice = InvoiceBuilder::new()
        .with_invoice_number(&pi_number)
        .build_from(&order);
    let packing_list = PackingListBuilder::new()
        .with_packing_list_number(&pl_number)
        .build_from(&order)
        .with_invoice(invoice.id);

    assert_eq!(invoice.invoice_number, "PI-2025-00001");
    assert_eq!(invoice.bank_details, *STANDARD_BANK);
    assert_eq!(packing_list.packing_list_number, "PL-2025-00001");
    assert_eq!(packing_list.invoice_id, Some(invoice.id));
    assert_eq!(packing_list.items.len(), order.items.len());
}

#[tokio::test]
async fn version_log_tracks_regenerated_invoices() {
    let log = InMemoryVersionLog::new();
    let order = OrderBuilder::new().build();
    let invoice = InvoiceBuilder::new()
        .with_invoice_number("INV-2025-00001")
        .with_invoice_type(InvoiceType::PostShipment)
        .build_from(&order);

    for generation in 1..=3u32 {
        let record = log
            .record(
                DocumentType::Invoice,
                &invoice.invoice_number,
                vec![
                    format!("/out/{}-{generation}.pdf", invoice.invoice_number),
                    format!("/out/{}-{generation}.xlsx", invoice.invoice_number),
                ],
            )
            .await
            .unwrap();
        assert_eq!(record.version, generation);
        assert_eq!(record.files.len(), 2);
    }

    let history = log
        .history(DocumentType::Invoice, &invoice.invoice_number)
        .await
        .unwrap();
    assert_eq!(history.len(), 3);
    assert!(history.windows(2).all(|w| w[0].version < w[1].version));
}
