//! Regulatory filing DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain_documents::{FilingType, RegulatoryFiling};

#[derive(Debug, Deserialize)]
pub struct CreateFilingRequest {
    /// shipping_bill, lut, drawback_claim, rodtep_claim or other
    pub filing_type: FilingType,
    pub order_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct FileFilingRequest {
    pub reference_number: String,
    pub filed_on: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct ResolveFilingRequest {
    pub approved: bool,
    pub remarks: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FilingResponse {
    pub id: Uuid,
    pub filing_type: &'static str,
    pub reference_number: Option<String>,
    pub order_id: Option<Uuid>,
    pub filed_on: Option<NaiveDate>,
    pub status: &'static str,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&RegulatoryFiling> for FilingResponse {
    fn from(filing: &RegulatoryFiling) -> Self {
        Self {
            id: *filing.id.as_uuid(),
            filing_type: filing.filing_type.as_str(),
            reference_number: filing.reference_number.clone(),
            order_id: filing.order_id.map(|id| *id.as_uuid()),
            filed_on: filing.filed_on,
            status: filing.status.as_str(),
            remarks: filing.remarks.clone(),
            created_at: filing.created_at,
            updated_at: filing.updated_at,
        }
    }
}
