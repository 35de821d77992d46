//! Renderer error types

use thiserror::Error;

/// Errors produced while rendering documents
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("QR encoding failed: {0}")]
    Qr(String),

    #[error("Spreadsheet generation failed: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        RenderError::InvalidDocument(msg.into())
    }
}
