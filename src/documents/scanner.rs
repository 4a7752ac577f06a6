// file: src/documents/scanner.rs
// description: directory walking and document discovery with filtering
// reference: https://docs.rs/walkdir

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// File types the document service accepts, keyed by extension.
const SUPPORTED_EXTENSIONS: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("gif", "image/gif"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
];

pub struct DocumentScanner {
    config: PipelineConfig,
}

#[derive(Debug, Clone)]
pub struct ScannedDocument {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
}

impl DocumentScanner {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Enumerate submittable documents in `root`, sorted by file name so a
    /// run over unchanged inputs always processes in the same order. Only
    /// files of the configured MIME type are admitted.
    pub fn scan_directory(&self, root: &Path, recursive: bool) -> Result<Vec<ScannedDocument>> {
        if !root.is_dir() {
            return Err(PipelineError::Validation(format!(
                "Documents directory does not exist: {}",
                root.display()
            )));
        }

        info!("Scanning directory: {}", root.display());
        let max_depth = if recursive { usize::MAX } else { 1 };
        let mut documents = Vec::new();

        for entry in WalkDir::new(root)
            .max_depth(max_depth)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy().to_string();

            if file_name.starts_with('.') {
                debug!("Skipping hidden file: {}", path.display());
                continue;
            }

            let Some(mime_type) = Self::mime_for_path(path) else {
                debug!("Skipping unsupported file type: {}", path.display());
                continue;
            };

            if mime_type != self.config.mime_type {
                debug!(
                    "Skipping {} ({}, run is configured for {})",
                    path.display(),
                    mime_type,
                    self.config.mime_type
                );
                continue;
            }

            if let Ok(metadata) = entry.metadata() {
                let size = metadata.len();
                let max_size = (self.config.max_file_size_mb * 1024 * 1024) as u64;

                if size > max_size {
                    debug!(
                        "Skipping large file ({} MB): {}",
                        size / 1024 / 1024,
                        path.display()
                    );
                    continue;
                }

                documents.push(ScannedDocument {
                    path: path.to_path_buf(),
                    file_name,
                    mime_type,
                    size,
                });
            }
        }

        documents.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        info!("Found {} documents", documents.len());
        Ok(documents)
    }

    /// MIME type for a supported document file, or None if the service
    /// cannot take it.
    pub fn mime_for_path(path: &Path) -> Option<String> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();

        SUPPORTED_EXTENSIONS
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, mime)| mime.to_string())
    }
}
