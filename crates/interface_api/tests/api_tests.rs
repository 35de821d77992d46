//! End-to-end API tests against an in-memory database

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Datelike, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use infra_db::{create_pool, init_schema, DatabaseConfig};
use interface_api::{config::ApiConfig, create_router, AppState};

struct TestApp {
    app: Router,
    // keeps the output directory alive for the duration of the test
    _output_dir: tempfile::TempDir,
}

async fn test_app() -> TestApp {
    let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
    init_schema(&pool).await.unwrap();

    let output_dir = tempfile::tempdir().unwrap();
    let config = ApiConfig {
        output_dir: output_dir.path().display().to_string(),
        ..ApiConfig::default()
    };
    let state = AppState::new(pool, config).unwrap();
    TestApp {
        app: create_router(state),
        _output_dir: output_dir,
    }
}

impl TestApp {
    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_customer(&self) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/api/v1/customers",
                Some(json!({
                    "name": "Lagos Pharma Distributors",
                    "address": "21 Broad Street",
                    "city": "Lagos",
                    "country": "Nigeria"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    async fn create_product(&self) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/api/v1/products",
                Some(json!({
                    "name": "Amoxicillin",
                    "unit": "capsules",
                    "hsn_code": "30042020",
                    "dosage_form": "Capsules",
                    "strength": "250 mg"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Customer + product + one order of 1000 x 0.05 USD
    async fn create_order(&self) -> Value {
        let customer_id = self.create_customer().await;
        let product_id = self.create_product().await;
        let (status, body) = self
            .send(
                "POST",
                "/api/v1/orders",
                Some(json!({
                    "customer_id": customer_id,
                    "ordered_at": "2025-03-01",
                    "currency": "USD",
                    "items": [
                        {"product_id": product_id, "quantity": 1000, "unit_price": 0.05}
                    ]
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"].clone()
    }

    async fn create_invoice(&self, order_id: &str, invoice_type: &str) -> (StatusCode, Value) {
        self.send(
            "POST",
            &format!("/api/v1/orders/{order_id}/invoices"),
            Some(json!({ "invoice_type": invoice_type })),
        )
        .await
    }
}

#[tokio::test]
async fn health_reports_success_envelope() {
    let app = test_app().await;
    let (status, body) = app.send("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["service"], "export-docs-core");
}

#[tokio::test]
async fn customer_crud_and_pagination_envelope() {
    let app = test_app().await;
    let id = app.create_customer().await;

    let (status, body) = app.send("GET", &format!("/api/v1/customers/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Lagos Pharma Distributors");

    let (status, body) = app.send("GET", "/api/v1/customers?page=1&per_page=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["pagination"]["per_page"], 10);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = app
        .send(
            "GET",
            "/api/v1/customers/00000000-0000-0000-0000-000000000000",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn blank_customer_name_is_rejected() {
    let app = test_app().await;
    let (status, body) = app
        .send(
            "POST",
            "/api/v1/customers",
            Some(json!({"name": "", "address": "x", "country": "Kenya"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn orders_get_sequential_numbers_and_legacy_rounded_totals() {
    let app = test_app().await;
    let year = Utc::now().year();

    let order = app.create_order().await;
    assert_eq!(order["order_number"], format!("ORD-{year}-00001"));
    assert_eq!(order["totals"]["subtotal"], json!("50.00"));
    assert_eq!(order["totals"]["igst"], json!("0.00"));
    assert_eq!(order["totals"]["drawback"], json!("0.60"));
    assert_eq!(order["totals"]["rodtep"], json!("0.35"));
    assert_eq!(order["totals"]["total_amount"], json!("49.05"));

    let second = app.create_order().await;
    assert_eq!(second["order_number"], format!("ORD-{year}-00002"));
}

#[tokio::test]
async fn order_cannot_skip_lifecycle_steps() {
    let app = test_app().await;
    let order = app.create_order().await;
    let id = order["id"].as_str().unwrap();

    let (status, body) = app
        .send(
            "POST",
            &format!("/api/v1/orders/{id}/status"),
            Some(json!({"status": "shipped"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");

    let (status, _) = app
        .send(
            "POST",
            &format!("/api/v1/orders/{id}/status"),
            Some(json!({"status": "confirmed"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn one_invoice_per_order_and_type() {
    let app = test_app().await;
    let order = app.create_order().await;
    let order_id = order["id"].as_str().unwrap();
    let year = Utc::now().year();

    let (status, body) = app.create_invoice(order_id, "proforma").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body["data"]["invoice_number"],
        format!("PI-{year}-00001")
    );
    // the invoice freezes the order's figure block
    assert_eq!(body["data"]["totals"]["total_amount"], json!("49.05"));

    let (status, body) = app.create_invoice(order_id, "proforma").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    // a different flavour is allowed
    let (status, _) = app.create_invoice(order_id, "pre-shipment").await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = app
        .send("GET", &format!("/api/v1/orders/{order_id}/invoices"), None)
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn one_packing_list_per_order() {
    let app = test_app().await;
    let order = app.create_order().await;
    let order_id = order["id"].as_str().unwrap();
    let product_id = order["items"][0]["product_id"].as_str().unwrap();
    let year = Utc::now().year();

    let body = json!({
        "items": [
            {
                "product_id": product_id,
                "quantity": 1000,
                "packages": 4,
                "net_weight_kg": 10.0,
                "gross_weight_kg": 11.5
            }
        ]
    });

    let (status, first) = app
        .send(
            "POST",
            &format!("/api/v1/orders/{order_id}/packing-lists"),
            Some(body.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        first["data"]["packing_list_number"],
        format!("PL-{year}-00001")
    );

    let (status, duplicate) = app
        .send(
            "POST",
            &format!("/api/v1/orders/{order_id}/packing-lists"),
            Some(body),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(duplicate["error"], "conflict");
}

#[tokio::test]
async fn invoice_download_streams_a_pdf() {
    let app = test_app().await;
    let order = app.create_order().await;
    let (_, body) = app
        .create_invoice(order["id"].as_str().unwrap(), "proforma")
        .await;
    let invoice_id = body["data"]["id"].as_str().unwrap();

    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/v1/invoices/{invoice_id}/document"))
        .body(Body::empty())
        .unwrap();
    let response = app.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn repeated_generation_appends_versions() {
    let app = test_app().await;
    let order = app.create_order().await;
    let (_, body) = app
        .create_invoice(order["id"].as_str().unwrap(), "proforma")
        .await;
    let invoice_id = body["data"]["id"].as_str().unwrap().to_string();
    let number = body["data"]["invoice_number"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(
            "POST",
            &format!("/api/v1/invoices/{invoice_id}/documents"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["version"], 1);
    // the default render produces the PDF + Excel pair
    assert_eq!(body["data"]["files"].as_array().unwrap().len(), 2);

    let (_, body) = app
        .send(
            "POST",
            &format!("/api/v1/invoices/{invoice_id}/documents"),
            None,
        )
        .await;
    assert_eq!(body["data"]["version"], 2);

    let (status, body) = app
        .send(
            "GET",
            &format!("/api/v1/documents/invoice/{number}/versions"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let history = body["data"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["version"], 1);
    assert_eq!(history[1]["version"], 2);
}

#[tokio::test]
async fn bulk_export_tolerates_unknown_invoices() {
    let app = test_app().await;
    let order = app.create_order().await;
    let (_, body) = app
        .create_invoice(order["id"].as_str().unwrap(), "proforma")
        .await;
    let invoice_id = body["data"]["id"].as_str().unwrap();

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/documents/bulk",
            Some(json!({
                "invoice_ids": [invoice_id, "00000000-0000-0000-0000-000000000000"],
                "format": "pdf"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["generated"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["failures"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["complete"], false);
    assert!(body["data"]["archive_path"]
        .as_str()
        .unwrap()
        .ends_with(".zip"));
}

#[tokio::test]
async fn purchase_order_flow() {
    let app = test_app().await;
    let product_id = app.create_product().await;
    let year = Utc::now().year();

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/purchase-orders",
            Some(json!({
                "supplier_name": "Sai Pharma Labs",
                "ordered_at": "2025-02-01",
                "currency": "INR",
                "tax_rate": 0.12,
                "items": [
                    {"product_id": product_id, "quantity": 200, "unit_price": 1.25}
                ]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["po_number"], format!("PO-{year}-00001"));
    assert_eq!(body["data"]["subtotal"], json!("250.00"));
    assert_eq!(body["data"]["tax"], json!("30.00"));
    assert_eq!(body["data"]["total"], json!("280.00"));
}
