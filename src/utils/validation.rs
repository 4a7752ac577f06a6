// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

lazy_static! {
    // 'us', 'eu', or a regional id like 'europe-west4'
    static ref LOCATION: Regex =
        Regex::new(r"^[a-z]{2,}(-[a-z0-9]+)?$").expect("LOCATION regex is valid");

    // hex processor ids as issued by the service
    static ref PROCESSOR_ID: Regex =
        Regex::new(r"^[a-f0-9]{8,32}$").expect("PROCESSOR_ID regex is valid");
}

/// MIME types the document service accepts for raw submission.
const SUPPORTED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "image/tiff",
    "image/gif",
    "image/jpeg",
    "image/png",
    "image/bmp",
    "image/webp",
];

pub struct Validator;

impl Validator {
    pub fn validate_location(location: &str) -> Result<()> {
        if !LOCATION.is_match(location) {
            return Err(PipelineError::Validation(format!(
                "Invalid location: {}",
                location
            )));
        }
        Ok(())
    }

    pub fn validate_processor_id(processor_id: &str) -> Result<()> {
        if !PROCESSOR_ID.is_match(processor_id) {
            return Err(PipelineError::Validation(format!(
                "Invalid processor id: {}",
                processor_id
            )));
        }
        Ok(())
    }

    pub fn validate_mime_type(mime_type: &str) -> Result<()> {
        if !SUPPORTED_MIME_TYPES.contains(&mime_type) {
            return Err(PipelineError::Validation(format!(
                "Unsupported MIME type: {}",
                mime_type
            )));
        }
        Ok(())
    }

    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(PipelineError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(PipelineError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_file_path(path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(PipelineError::Validation(format!(
                "Path is not a file: {}",
                path.display()
            )));
        }
        Ok(())
    }

    pub fn validate_content_not_empty(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(PipelineError::Validation("Content is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_location() {
        assert!(Validator::validate_location("us").is_ok());
        assert!(Validator::validate_location("eu").is_ok());
        assert!(Validator::validate_location("europe-west4").is_ok());
        assert!(Validator::validate_location("EU").is_err());
        assert!(Validator::validate_location("eu region").is_err());
        assert!(Validator::validate_location("").is_err());
    }

    #[test]
    fn test_validate_processor_id() {
        assert!(Validator::validate_processor_id("823b06a76761e433").is_ok());
        assert!(Validator::validate_processor_id("ABC123").is_err());
        assert!(Validator::validate_processor_id("short").is_err());
        assert!(Validator::validate_processor_id("").is_err());
    }

    #[test]
    fn test_validate_mime_type() {
        assert!(Validator::validate_mime_type("application/pdf").is_ok());
        assert!(Validator::validate_mime_type("image/tiff").is_ok());
        assert!(Validator::validate_mime_type("text/plain").is_err());
    }

    #[test]
    fn test_validate_directory() {
        let temp = TempDir::new().unwrap();
        assert!(Validator::validate_directory(temp.path()).is_ok());
        assert!(Validator::validate_directory(Path::new("/nonexistent")).is_err());
    }

    #[test]
    fn test_validate_file_path() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("doc.pdf");
        fs::write(&file_path, b"%PDF").unwrap();

        assert!(Validator::validate_file_path(&file_path).is_ok());
        assert!(Validator::validate_file_path(temp.path()).is_err());
    }

    #[test]
    fn test_validate_content_not_empty() {
        assert!(Validator::validate_content_not_empty("content").is_ok());
        assert!(Validator::validate_content_not_empty("").is_err());
        assert!(Validator::validate_content_not_empty("   ").is_err());
    }
}
