//! Render options

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RenderError;

/// Output formats the renderer can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Pdf,
    Excel,
    Html,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Excel => "xlsx",
            OutputFormat::Html => "html",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            OutputFormat::Html => "text/html; charset=utf-8",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Excel => "excel",
            OutputFormat::Html => "html",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "excel" | "xlsx" => Ok(OutputFormat::Excel),
            "html" => Ok(OutputFormat::Html),
            other => Err(RenderError::invalid(format!(
                "Unknown output format: {other}"
            ))),
        }
    }
}

/// Options for a single render call
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Requested format; `None` produces the standard PDF + Excel pair
    pub format: Option<OutputFormat>,
    /// Watermark text override; `None` uses the document's own default
    pub watermark: Option<String>,
    pub include_page_numbers: bool,
    pub include_version: bool,
    /// Version number stamped in the footer, from the version log
    pub version: u32,
    pub signature_placeholder: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: None,
            watermark: None,
            include_page_numbers: true,
            include_version: true,
            version: 1,
            signature_placeholder: true,
        }
    }
}

impl RenderOptions {
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_watermark(mut self, watermark: impl Into<String>) -> Self {
        self.watermark = Some(watermark.into());
        self
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// The formats this call will produce
    pub fn effective_formats(&self) -> Vec<OutputFormat> {
        match self.format {
            Some(format) => vec![format],
            None => vec![OutputFormat::Pdf, OutputFormat::Excel],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_produces_pdf_and_excel() {
        let options = RenderOptions::default();
        assert_eq!(
            options.effective_formats(),
            vec![OutputFormat::Pdf, OutputFormat::Excel]
        );
    }

    #[test]
    fn test_explicit_format_is_exclusive() {
        let options = RenderOptions::default().with_format(OutputFormat::Html);
        assert_eq!(options.effective_formats(), vec![OutputFormat::Html]);
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("xlsx".parse::<OutputFormat>().unwrap(), OutputFormat::Excel);
        assert_eq!("PDF".parse::<OutputFormat>().unwrap(), OutputFormat::Pdf);
        assert!("docx".parse::<OutputFormat>().is_err());
    }
}
