// file: src/keywords/loader.rs
// description: reads the keyword list from the first column of a spreadsheet
// reference: https://docs.rs/calamine

use crate::error::{PipelineError, Result};
use calamine::{Data, Reader, open_workbook_auto};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Loads keywords from column 0 of a tabular file, header row excluded.
///
/// Supported formats: xlsx/xls/xlsb/ods via calamine, plus csv. Cells are
/// trimmed; blanks are dropped; duplicates (case-insensitive) keep their
/// first occurrence so the source order is preserved.
pub struct KeywordLoader;

impl KeywordLoader {
    pub fn load(path: &Path) -> Result<Vec<String>> {
        if !path.is_file() {
            return Err(PipelineError::KeywordSource {
                path: path.to_path_buf(),
                message: "file not found".to_string(),
            });
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let raw = match extension.as_str() {
            "csv" => Self::read_csv(path)?,
            "xlsx" | "xls" | "xlsb" | "ods" => Self::read_workbook(path)?,
            other => {
                return Err(PipelineError::KeywordSource {
                    path: path.to_path_buf(),
                    message: format!("unsupported keyword source format: .{}", other),
                });
            }
        };

        let keywords = Self::clean(raw);
        info!("Loaded {} keywords from {}", keywords.len(), path.display());
        Ok(keywords)
    }

    fn read_workbook(path: &Path) -> Result<Vec<String>> {
        let mut workbook =
            open_workbook_auto(path).map_err(|e| PipelineError::KeywordSource {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| PipelineError::KeywordSource {
                path: path.to_path_buf(),
                message: "workbook has no sheets".to_string(),
            })?
            .map_err(|e| PipelineError::KeywordSource {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let mut values = Vec::new();
        // skip(1): first row is the header
        for row in range.rows().skip(1) {
            match row.first() {
                None | Some(Data::Empty) => continue,
                Some(cell) => values.push(cell.to_string()),
            }
        }

        Ok(values)
    }

    fn read_csv(path: &Path) -> Result<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| PipelineError::KeywordSource {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let mut values = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| PipelineError::KeywordSource {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

            if let Some(first) = record.get(0) {
                values.push(first.to_string());
            }
        }

        Ok(values)
    }

    fn clean(raw: Vec<String>) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut keywords = Vec::new();

        for value in raw {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                continue;
            }

            if seen.insert(trimmed.to_lowercase()) {
                keywords.push(trimmed.to_string());
            } else {
                debug!("Dropping duplicate keyword: {}", trimmed);
            }
        }

        keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_csv_first_column_header_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "keywords.csv",
            "keyword,notes\ninvoice,billing\ntotal,amounts\nurgent,flags\n",
        );

        let keywords = KeywordLoader::load(&path).unwrap();
        assert_eq!(keywords, vec!["invoice", "total", "urgent"]);
    }

    #[test]
    fn test_blank_and_duplicate_rows_dropped() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "keywords.csv",
            "keyword\ninvoice\n\n  \nInvoice\ntotal\n",
        );

        let keywords = KeywordLoader::load(&path).unwrap();
        assert_eq!(keywords, vec!["invoice", "total"]);
    }

    #[test]
    fn test_values_are_trimmed() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "keywords.csv", "keyword\n  invoice  \n");

        let keywords = KeywordLoader::load(&path).unwrap();
        assert_eq!(keywords, vec!["invoice"]);
    }

    #[test]
    fn test_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        let result = KeywordLoader::load(&dir.path().join("absent.csv"));
        assert!(matches!(
            result,
            Err(PipelineError::KeywordSource { .. })
        ));
    }

    #[test]
    fn test_unsupported_extension_errors() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "keywords.txt", "keyword\ninvoice\n");

        let result = KeywordLoader::load(&path);
        assert!(matches!(
            result,
            Err(PipelineError::KeywordSource { .. })
        ));
    }

    #[test]
    fn test_malformed_workbook_errors() {
        let dir = TempDir::new().unwrap();
        // not a zip container, so the xlsx reader must refuse it
        let path = write_csv(&dir, "keywords.xlsx", "this is not a workbook");

        let result = KeywordLoader::load(&path);
        assert!(matches!(
            result,
            Err(PipelineError::KeywordSource { .. })
        ));
    }
}
