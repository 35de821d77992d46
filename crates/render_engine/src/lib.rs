//! Render Engine - PDF, Excel and HTML document generation
//!
//! Takes a hydrated [`DocumentData`] view of an invoice, packing list or
//! purchase order and writes presentation files to an output directory.
//! The PDF and HTML outputs are frozen snapshots of the entity's stored
//! figures; the Excel output recomputes through worksheet formulas. Bulk
//! export renders a batch into a zip archive and tolerates per-document
//! failures.

pub mod bulk;
pub mod error;
pub mod model;
pub mod options;

mod excel;
mod html;
mod pdf;
mod qr;

use std::path::{Path, PathBuf};

use chrono::Utc;

pub use bulk::{BulkFailure, BulkReport};
pub use error::RenderError;
pub use model::{CompanyProfile, DocumentData, ItemRow, PartyBlock, TotalKind, TotalLine};
pub use options::{OutputFormat, RenderOptions};

/// One file produced by a render call
#[derive(Debug, Clone)]
pub struct RenderedFile {
    pub format: OutputFormat,
    pub path: PathBuf,
}

/// The result of rendering one document
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub document_number: String,
    pub files: Vec<RenderedFile>,
}

impl RenderedDocument {
    /// File paths as strings, for the version log
    pub fn file_paths(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|f| f.path.display().to_string())
            .collect()
    }

    pub fn path_for(&self, format: OutputFormat) -> Option<&Path> {
        self.files
            .iter()
            .find(|f| f.format == format)
            .map(|f| f.path.as_path())
    }
}

/// Renders documents into an output directory
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    output_dir: PathBuf,
}

impl DocumentRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Renders one document in the formats the options select
    pub fn render(
        &self,
        data: &DocumentData,
        options: &RenderOptions,
    ) -> Result<RenderedDocument, RenderError> {
        let files = self.render_into(&self.output_dir, data, options)?;
        tracing::info!(
            document = %data.number,
            files = files.len(),
            "rendered document"
        );
        Ok(RenderedDocument {
            document_number: data.number.clone(),
            files,
        })
    }

    /// Renders into an arbitrary directory; shared with bulk export
    pub(crate) fn render_into(
        &self,
        dir: &Path,
        data: &DocumentData,
        options: &RenderOptions,
    ) -> Result<Vec<RenderedFile>, RenderError> {
        data.validate()?;
        let stem = file_stem(&data.number);
        let mut files = Vec::new();
        for format in options.effective_formats() {
            let path = dir.join(format!("{stem}.{}", format.extension()));
            match format {
                OutputFormat::Pdf => pdf::render(data, options, &path)?,
                OutputFormat::Excel => excel::render(data, options, &path)?,
                OutputFormat::Html => html::render(data, options, &path)?,
            }
            files.push(RenderedFile { format, path });
        }
        Ok(files)
    }
}

/// Timestamped, filesystem-safe file stem for a document number
pub(crate) fn file_stem(number: &str) -> String {
    let safe: String = number
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!("{safe}-{}", Utc::now().format("%Y%m%d%H%M%S%3f"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_sanitizes_separators() {
        let stem = file_stem("INV/2025 00001");
        assert!(stem.starts_with("INV-2025-00001-"));
        assert!(!stem.contains('/'));
        assert!(!stem.contains(' '));
    }
}
