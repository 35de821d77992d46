//! Invoice DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain_documents::{BankDetails, Invoice, InvoiceType};

use super::order::{OrderItemResponse, TotalsResponse};

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    /// proforma, pre-shipment or post-shipment
    pub invoice_type: InvoiceType,
    pub due_date: Option<NaiveDate>,
    pub terms: Option<String>,
    /// Bank details override; the company default is used when omitted
    pub bank_details: Option<BankDetailsDto>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub due_date: Option<NaiveDate>,
    pub terms: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankDetailsDto {
    pub bank_name: String,
    pub account_number: String,
    pub swift_code: String,
    pub ifsc_code: String,
    pub branch: Option<String>,
}

impl From<BankDetailsDto> for BankDetails {
    fn from(dto: BankDetailsDto) -> Self {
        BankDetails {
            bank_name: dto.bank_name,
            account_number: dto.account_number,
            swift_code: dto.swift_code,
            ifsc_code: dto.ifsc_code,
            branch: dto.branch,
        }
    }
}

impl From<&BankDetails> for BankDetailsDto {
    fn from(bank: &BankDetails) -> Self {
        Self {
            bank_name: bank.bank_name.clone(),
            account_number: bank.account_number.clone(),
            swift_code: bank.swift_code.clone(),
            ifsc_code: bank.ifsc_code.clone(),
            branch: bank.branch.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub invoice_number: String,
    pub invoice_type: &'static str,
    pub order_id: Uuid,
    pub customer_id: Uuid,
    pub invoice_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub currency: &'static str,
    pub items: Vec<OrderItemResponse>,
    pub totals: TotalsResponse,
    pub bank_details: BankDetailsDto,
    pub terms: Option<String>,
    pub status: &'static str,
    pub overdue: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Invoice> for InvoiceResponse {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: *invoice.id.as_uuid(),
            invoice_number: invoice.invoice_number.clone(),
            invoice_type: invoice.invoice_type.as_str(),
            order_id: *invoice.order_id.as_uuid(),
            customer_id: *invoice.customer_id.as_uuid(),
            invoice_date: invoice.invoice_date,
            due_date: invoice.due_date,
            currency: invoice.currency.code(),
            items: invoice.items.iter().map(OrderItemResponse::from).collect(),
            totals: TotalsResponse::from(&invoice.totals),
            bank_details: BankDetailsDto::from(&invoice.bank_details),
            terms: invoice.terms.clone(),
            status: invoice.status.as_str(),
            overdue: invoice.is_overdue(),
            created_at: invoice.created_at,
            updated_at: invoice.updated_at,
        }
    }
}
