// file: src/models/document.rs
// description: core document model with content hashing
// reference: internal data structures

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub file_name: String,
    pub path: PathBuf,
    pub mime_type: String,
    pub size: u64,
    pub content_hash: String,
}

impl Document {
    pub fn new(file_name: String, path: PathBuf, mime_type: String, payload: &[u8]) -> Self {
        let content_hash = Self::compute_hash(payload);

        Self {
            file_name,
            path,
            mime_type,
            size: payload.len() as u64,
            content_hash,
        }
    }

    fn compute_hash(payload: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(payload);
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new(
            "invoice.pdf".to_string(),
            PathBuf::from("/data/pdf_files/invoice.pdf"),
            "application/pdf".to_string(),
            b"%PDF-1.4 fake payload",
        );

        assert_eq!(doc.file_name, "invoice.pdf");
        assert_eq!(doc.size, 21);
        assert!(!doc.content_hash.is_empty());
    }

    #[test]
    fn test_hash_consistency() {
        let payload = b"identical bytes";
        let hash1 = Document::compute_hash(payload);
        let hash2 = Document::compute_hash(payload);
        assert_eq!(hash1, hash2);
    }
}
