//! Document generation DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain_documents::DocumentVersionRecord;
use render_engine::{BulkReport, RenderedDocument};

/// Query parameters for generation endpoints,
/// `?format=pdf&watermark=DUPLICATE`
#[derive(Debug, Default, Deserialize)]
pub struct RenderQuery {
    /// pdf, excel/xlsx or html; omitted means the PDF + Excel pair
    pub format: Option<String>,
    /// Watermark text override
    pub watermark: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RenderedFileResponse {
    pub format: String,
    pub path: String,
}

/// Metadata for one generation event
#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub document_number: String,
    pub version: u32,
    pub files: Vec<RenderedFileResponse>,
}

impl RenderResponse {
    pub fn new(rendered: &RenderedDocument, version: u32) -> Self {
        Self {
            document_number: rendered.document_number.clone(),
            version,
            files: rendered
                .files
                .iter()
                .map(|f| RenderedFileResponse {
                    format: f.format.to_string(),
                    path: f.path.display().to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BulkExportRequest {
    pub invoice_ids: Vec<Uuid>,
    /// Single format for the archived files; omitted means PDF + Excel
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BulkFailureResponse {
    pub document_number: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct BulkExportResponse {
    pub archive_path: String,
    pub generated: Vec<String>,
    pub failures: Vec<BulkFailureResponse>,
    pub complete: bool,
}

impl From<&BulkReport> for BulkExportResponse {
    fn from(report: &BulkReport) -> Self {
        Self {
            archive_path: report.archive_path.display().to_string(),
            generated: report.generated.clone(),
            failures: report
                .failures
                .iter()
                .map(|f| BulkFailureResponse {
                    document_number: f.document_number.clone(),
                    reason: f.reason.clone(),
                })
                .collect(),
            complete: report.is_complete(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: u32,
    pub timestamp: DateTime<Utc>,
    pub files: Vec<String>,
}

impl From<&DocumentVersionRecord> for VersionResponse {
    fn from(record: &DocumentVersionRecord) -> Self {
        Self {
            version: record.version,
            timestamp: record.timestamp,
            files: record.files.clone(),
        }
    }
}
