//! Repository tests against an in-memory SQLite database

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sqlx::SqlitePool;

use core_kernel::Currency;
use domain_documents::{
    BankDetails, DocumentType, FilingType, Invoice, InvoiceStatus, InvoiceType, NumberScope,
    NumberingRegistry, PackingList, PackingListItem, RegulatoryFiling, VersionStore,
};
use domain_orders::{
    Customer, ExportRates, Order, OrderItem, OrderStatus, Product, PurchaseOrder,
    PurchaseOrderItem,
};
use infra_db::{
    create_pool, init_schema, CustomerRepository, DatabaseConfig, FilingRepository,
    InvoiceRepository, OrderRepository, PackingListRepository, ProductRepository,
    PurchaseOrderRepository, SqliteSequenceStore, SqliteVersionLog,
};

async fn test_pool() -> SqlitePool {
    let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
    init_schema(&pool).await.unwrap();
    pool
}

fn customer() -> Customer {
    Customer::new("Lagos Pharma Distributors", "21 Broad Street", "Nigeria")
        .unwrap()
        .with_city("Lagos")
        .with_contact(Some("purchasing@lagospharma.example".to_string()), None)
}

fn bank() -> BankDetails {
    BankDetails {
        bank_name: "HDFC Bank".to_string(),
        account_number: "50100012345678".to_string(),
        swift_code: "HDFCINBB".to_string(),
        ifsc_code: "HDFC0000001".to_string(),
        branch: None,
    }
}

async fn stored_order(pool: &SqlitePool) -> Order {
    let customer = customer();
    CustomerRepository::new(pool.clone())
        .insert(&customer)
        .await
        .unwrap();

    let product = Product::new("Amoxicillin", "capsules")
        .unwrap()
        .with_form("Capsules", "250 mg")
        .with_hsn("30042020");
    ProductRepository::new(pool.clone())
        .insert(&product)
        .await
        .unwrap();

    let mut order = Order::new(
        "ORD-2025-00001",
        customer.id,
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        Currency::USD,
    );
    order
        .set_items(
            vec![OrderItem::new(product.id, dec!(1000), dec!(0.05))],
            &ExportRates::default(),
        )
        .unwrap();
    OrderRepository::new(pool.clone())
        .insert(&order)
        .await
        .unwrap();
    order
}

#[tokio::test]
async fn customer_roundtrip_update_and_delete() {
    let pool = test_pool().await;
    let repo = CustomerRepository::new(pool.clone());

    let mut customer = customer();
    repo.insert(&customer).await.unwrap();

    let loaded = repo.get(customer.id).await.unwrap();
    assert_eq!(loaded.name, "Lagos Pharma Distributors");
    assert_eq!(loaded.city.as_deref(), Some("Lagos"));

    customer.country = "Ghana".to_string();
    repo.update(&customer).await.unwrap();
    assert_eq!(repo.get(customer.id).await.unwrap().country, "Ghana");

    assert_eq!(repo.count().await.unwrap(), 1);
    repo.delete(customer.id).await.unwrap();
    assert!(repo.find(customer.id).await.unwrap().is_none());
    assert!(repo.delete(customer.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn order_roundtrip_preserves_figures_and_status() {
    let pool = test_pool().await;
    let order = stored_order(&pool).await;
    let repo = OrderRepository::new(pool.clone());

    let loaded = repo.get(order.id).await.unwrap();
    assert_eq!(loaded.order_number, "ORD-2025-00001");
    assert_eq!(loaded.status, OrderStatus::Draft);
    assert_eq!(loaded.items.len(), 1);
    assert_eq!(loaded.totals.subtotal.amount(), dec!(50.00));
    assert_eq!(loaded.totals.drawback.amount(), dec!(0.60));
    assert_eq!(loaded.totals.rodtep.amount(), dec!(0.35));
    assert_eq!(loaded.totals.total_amount.amount(), dec!(49.05));

    let mut updated = loaded;
    updated.confirm().unwrap();
    repo.update(&updated).await.unwrap();
    assert_eq!(
        repo.get(order.id).await.unwrap().status,
        OrderStatus::Confirmed
    );
}

#[tokio::test]
async fn one_invoice_per_order_and_type() {
    let pool = test_pool().await;
    let order = stored_order(&pool).await;
    let repo = InvoiceRepository::new(pool.clone());

    let first = Invoice::from_order("PI-2025-00001", InvoiceType::Proforma, &order, bank());
    repo.insert(&first).await.unwrap();

    let duplicate = Invoice::from_order("PI-2025-00002", InvoiceType::Proforma, &order, bank());
    let err = repo.insert(&duplicate).await.unwrap_err();
    assert!(err.is_unique_violation());

    // a different invoice type on the same order is fine
    let pre_shipment =
        Invoice::from_order("PSI-2025-00001", InvoiceType::PreShipment, &order, bank());
    repo.insert(&pre_shipment).await.unwrap();

    let for_order = repo.list_by_order(order.id).await.unwrap();
    assert_eq!(for_order.len(), 2);
}

#[tokio::test]
async fn invoice_update_only_moves_mutable_fields() {
    let pool = test_pool().await;
    let order = stored_order(&pool).await;
    let repo = InvoiceRepository::new(pool.clone());

    let mut invoice = Invoice::from_order("INV-2025-00001", InvoiceType::PostShipment, &order, bank());
    repo.insert(&invoice).await.unwrap();

    invoice.issue().unwrap();
    repo.update(&invoice).await.unwrap();

    let loaded = repo.find_by_number("INV-2025-00001").await.unwrap().unwrap();
    assert_eq!(loaded.status, InvoiceStatus::Issued);
    assert_eq!(loaded.totals.total_amount.amount(), dec!(49.05));
    assert_eq!(loaded.bank_details, bank());
}

#[tokio::test]
async fn packing_list_roundtrip_with_invoice_link() {
    let pool = test_pool().await;
    let order = stored_order(&pool).await;

    let invoice = Invoice::from_order("PI-2025-00001", InvoiceType::Proforma, &order, bank());
    InvoiceRepository::new(pool.clone())
        .insert(&invoice)
        .await
        .unwrap();

    let packing_list = PackingList::new("PL-2025-00001", order.id, order.ordered_at)
        .with_invoice(invoice.id)
        .with_items(vec![PackingListItem::new(
            order.items[0].product_id,
            dec!(1000),
            4,
            dec!(10),
            dec!(11.5),
        )
        .with_batch("AMX24101", NaiveDate::from_ymd_opt(2027, 10, 31).unwrap())]);

    let repo = PackingListRepository::new(pool.clone());
    repo.insert(&packing_list).await.unwrap();

    let loaded = repo.get(packing_list.id).await.unwrap();
    assert_eq!(loaded.invoice_id, Some(invoice.id));
    assert_eq!(loaded.total_packages(), 4);
    assert_eq!(loaded.items[0].batch_number.as_deref(), Some("AMX24101"));
}

#[tokio::test]
async fn one_packing_list_per_order() {
    let pool = test_pool().await;
    let order = stored_order(&pool).await;
    let repo = PackingListRepository::new(pool.clone());

    let first = PackingList::new("PL-2025-00001", order.id, order.ordered_at);
    repo.insert(&first).await.unwrap();

    let duplicate = PackingList::new("PL-2025-00002", order.id, order.ordered_at);
    let err = repo.insert(&duplicate).await.unwrap_err();
    assert!(err.is_unique_violation());

    // a second order gets its own list
    let other_order = Order::new(
        "ORD-2025-00002",
        order.customer_id,
        order.ordered_at,
        Currency::USD,
    );
    OrderRepository::new(pool.clone())
        .insert(&other_order)
        .await
        .unwrap();
    let second = PackingList::new("PL-2025-00002", other_order.id, other_order.ordered_at);
    repo.insert(&second).await.unwrap();
}

#[tokio::test]
async fn purchase_order_roundtrip() {
    let pool = test_pool().await;

    let product = Product::new("Paracetamol", "tablets").unwrap();
    ProductRepository::new(pool.clone())
        .insert(&product)
        .await
        .unwrap();

    let mut po = PurchaseOrder::new(
        "PO-2025-00001",
        "Sai Pharma Labs",
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        Currency::INR,
        core_kernel::Rate::new(dec!(0.12)),
    );
    po.set_items(vec![PurchaseOrderItem::new(product.id, dec!(200), dec!(1.25))])
        .unwrap();

    let repo = PurchaseOrderRepository::new(pool.clone());
    repo.insert(&po).await.unwrap();

    let loaded = repo.get(po.id).await.unwrap();
    assert_eq!(loaded.totals.subtotal.amount(), dec!(250.00));
    assert_eq!(loaded.totals.tax.amount(), dec!(30.00));
    assert_eq!(loaded.totals.total.amount(), dec!(280.00));
    assert_eq!(loaded.tax_rate.as_decimal(), dec!(0.12));
}

#[tokio::test]
async fn filing_lifecycle_persists() {
    let pool = test_pool().await;
    let order = stored_order(&pool).await;
    let repo = FilingRepository::new(pool.clone());

    let mut filing = RegulatoryFiling::new(FilingType::DrawbackClaim).for_order(order.id);
    repo.insert(&filing).await.unwrap();

    filing
        .mark_filed("DBK/2025/001234", NaiveDate::from_ymd_opt(2025, 5, 20).unwrap())
        .unwrap();
    repo.update(&filing).await.unwrap();

    let by_order = repo.list_by_order(order.id).await.unwrap();
    assert_eq!(by_order.len(), 1);
    assert_eq!(
        by_order[0].reference_number.as_deref(),
        Some("DBK/2025/001234")
    );
}

#[tokio::test]
async fn sequence_store_issues_gapless_numbers_per_scope_and_year() {
    let pool = test_pool().await;
    let registry = NumberingRegistry::new(Arc::new(SqliteSequenceStore::new(pool.clone())));

    for expected in 1..=3u32 {
        let number = registry
            .next_number_for_year(NumberScope::Order, 2025)
            .await
            .unwrap();
        assert_eq!(number, format!("ORD-2025-{expected:05}"));
    }

    // a different year restarts the sequence
    let number = registry
        .next_number_for_year(NumberScope::Order, 2026)
        .await
        .unwrap();
    assert_eq!(number, "ORD-2026-00001");

    // a different scope has its own counter
    let number = registry
        .next_number_for_year(NumberScope::Invoice(InvoiceType::Proforma), 2025)
        .await
        .unwrap();
    assert_eq!(number, "PI-2025-00001");
}

#[tokio::test]
async fn version_log_appends_monotonically() {
    let pool = test_pool().await;
    let log = SqliteVersionLog::new(pool.clone());

    for generation in 1..=3u32 {
        let record = log
            .record(
                DocumentType::Invoice,
                "INV-2025-00001",
                vec![format!("/out/INV-2025-00001-{generation}.pdf")],
            )
            .await
            .unwrap();
        assert_eq!(record.version, generation);
    }

    let history = log
        .history(DocumentType::Invoice, "INV-2025-00001")
        .await
        .unwrap();
    assert_eq!(history.len(), 3);
    assert!(history.windows(2).all(|w| w[0].version < w[1].version));
    assert_eq!(history[0].files.len(), 1);

    // other documents are unaffected
    let other = log
        .history(DocumentType::PackingList, "PL-2025-00001")
        .await
        .unwrap();
    assert!(other.is_empty());
}
