//! Bulk export
//!
//! Renders a batch of documents into a staging directory and zips the
//! results. A document that fails to render is logged and reported in the
//! returned [`BulkReport`]; it never aborts the batch, and an archive is
//! produced even when every document fails.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::RenderError;
use crate::model::DocumentData;
use crate::options::RenderOptions;
use crate::{file_stem, DocumentRenderer};

/// One document that could not be rendered
#[derive(Debug, Clone)]
pub struct BulkFailure {
    pub document_number: String,
    pub reason: String,
}

/// Outcome of a bulk export
#[derive(Debug, Clone)]
pub struct BulkReport {
    pub archive_path: PathBuf,
    /// Numbers of the documents that made it into the archive
    pub generated: Vec<String>,
    pub failures: Vec<BulkFailure>,
}

impl BulkReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl DocumentRenderer {
    /// Renders a batch and packages the outputs into one zip archive
    pub fn render_bulk(
        &self,
        batch: &[DocumentData],
        options: &RenderOptions,
        archive_stem: &str,
    ) -> Result<BulkReport, RenderError> {
        let staging = tempfile::tempdir()?;
        let mut generated = Vec::new();
        let mut failures = Vec::new();
        let mut staged: Vec<PathBuf> = Vec::new();

        for data in batch {
            match self.render_into(staging.path(), data, options) {
                Ok(files) => {
                    generated.push(data.number.clone());
                    staged.extend(files.into_iter().map(|f| f.path));
                }
                Err(err) => {
                    tracing::warn!(
                        document = %data.number,
                        error = %err,
                        "skipping document in bulk export"
                    );
                    failures.push(BulkFailure {
                        document_number: data.number.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        let archive_path = self
            .output_dir()
            .join(format!("{}.zip", file_stem(archive_stem)));
        let file = File::create(&archive_path)?;
        let mut zip = ZipWriter::new(file);
        let zip_options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for path in &staged {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| RenderError::invalid("Staged file has no name"))?;
            zip.start_file(name, zip_options)?;
            zip.write_all(&std::fs::read(path)?)?;
        }
        zip.finish()?;

        tracing::info!(
            archive = %archive_path.display(),
            generated = generated.len(),
            failed = failures.len(),
            "bulk export complete"
        );
        Ok(BulkReport {
            archive_path,
            generated,
            failures,
        })
    }
}
