// file: src/exporter/json.rs
// description: json serialization of the tag report

use crate::error::Result;
use crate::models::TagReport;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Writes the tag report in one shot at the end of a run. The artifact
/// contains only the document-to-tags map; run metadata stays in the
/// summary so identical inputs produce identical bytes.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_path: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub documents: usize,
    pub exported_at: String,
}

impl JsonExporter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn write(&self, report: &TagReport, pretty: bool) -> Result<ExportSummary> {
        if let Some(parent) = self.output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut payload = if pretty {
            serde_json::to_vec_pretty(report)?
        } else {
            serde_json::to_vec(report)?
        };
        payload.push(b'\n');

        fs::write(&self.output_path, payload)?;

        info!(
            "Exported {} documents to {}",
            report.len(),
            self.output_path.display()
        );

        Ok(ExportSummary {
            path: self.output_path.clone(),
            documents: report.len(),
            exported_at: Utc::now().to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TagResult;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn sample_report() -> TagReport {
        let mut report = TagReport::new();
        report.insert(&TagResult::new(
            "invoice.pdf",
            vec!["invoice".to_string(), "total".to_string()],
        ));
        report.insert(&TagResult::new("memo.pdf", vec![]));
        report
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out/tags.json");
        let exporter = JsonExporter::new(&path);

        let summary = exporter.write(&sample_report(), false).unwrap();
        assert_eq!(summary.documents, 2);
        assert!(path.is_file());
    }

    #[test]
    fn test_compact_output_shape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tags.json");
        let exporter = JsonExporter::new(&path);

        exporter.write(&sample_report(), false).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "{\"invoice.pdf\":\"invoice,total\",\"memo.pdf\":\"\"}\n"
        );
    }

    #[test]
    fn test_repeated_export_is_byte_identical() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tags.json");
        let exporter = JsonExporter::new(&path);
        let report = sample_report();

        exporter.write(&report, true).unwrap();
        let first = fs::read(&path).unwrap();

        exporter.write(&report, true).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_unwritable_destination_errors() {
        let dir = tempdir().unwrap();
        // a directory at the destination path makes the write fail
        let path = dir.path().join("tags.json");
        fs::create_dir(&path).unwrap();

        let exporter = JsonExporter::new(&path);
        assert!(exporter.write(&sample_report(), false).is_err());
    }
}
