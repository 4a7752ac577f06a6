// file: src/pipeline/orchestrator.rs
// description: coordinates keyword loading, document OCR, matching, and export
// reference: sequential tagging workflow

use crate::config::Config;
use crate::documents::{DocumentScanner, ScannedDocument};
use crate::error::Result;
use crate::exporter::JsonExporter;
use crate::keywords::KeywordLoader;
use crate::models::{Document, TagReport, TagResult};
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use crate::service::DocAiClient;
use crate::tagger::TagMatcher;
use std::fs;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct RunOptions {
    pub pretty: bool,
    pub limit: Option<usize>,
    pub recursive: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            limit: None,
            recursive: false,
        }
    }
}

/// The end-to-end tagging run. Documents are processed one at a time:
/// submit to the remote service, wait for its text, match keywords,
/// accumulate. The report is flushed once at the very end; a failure
/// partway through aborts the run and writes nothing.
pub struct TaggingPipeline {
    config: Config,
    client: Arc<DocAiClient>,
}

impl TaggingPipeline {
    pub fn new(config: Config) -> Result<Self> {
        let client = Arc::new(DocAiClient::new(
            config.service.clone(),
            config.pipeline.clone(),
        )?);

        Ok(Self { config, client })
    }

    pub async fn run(&self, options: RunOptions) -> Result<PipelineStats> {
        info!("Starting tagging pipeline");

        let keywords = KeywordLoader::load(&self.config.tagging.keywords_path)?;
        if keywords.is_empty() {
            warn!("Keyword list is empty; every document will get an empty tag string");
        }

        let matcher = TagMatcher::new(keywords)?;

        let scanner = DocumentScanner::new(self.config.pipeline.clone());
        let documents =
            scanner.scan_directory(&self.config.tagging.documents_dir, options.recursive)?;

        let documents: Vec<ScannedDocument> = match options.limit {
            Some(limit) => documents.into_iter().take(limit).collect(),
            None => documents,
        };

        info!("Found {} documents to process", documents.len());

        if documents.is_empty() {
            warn!("No documents found to process");
            return Ok(PipelineStats::new());
        }

        let progress = ProgressTracker::new(documents.len());
        let mut report = TagReport::new();

        for scanned in &documents {
            progress.set_message(format!("Processing {}", scanned.file_name));

            let result = self.tag_document(&matcher, scanned).await?;

            progress.inc_documents_processed();
            progress.add_bytes_processed(scanned.size);
            progress.add_tags_matched(result.matched.len());

            report.insert(&result);
        }

        let exporter = JsonExporter::new(self.config.tagging.output_path.clone());
        let summary = exporter.write(&report, options.pretty)?;

        let stats = progress.get_stats();
        progress.finish();

        info!(
            "Report written to {} ({} documents)",
            summary.path.display(),
            summary.documents
        );
        self.log_final_stats(&stats);

        Ok(stats)
    }

    async fn tag_document(
        &self,
        matcher: &TagMatcher,
        scanned: &ScannedDocument,
    ) -> Result<TagResult> {
        let payload = fs::read(&scanned.path)?;

        let document = Document::new(
            scanned.file_name.clone(),
            scanned.path.clone(),
            scanned.mime_type.clone(),
            &payload,
        );

        debug!(
            "Submitting {} ({} bytes, sha256 {})",
            document.file_name, document.size, document.content_hash
        );

        let text = self
            .client
            .process_document(&payload, &document.mime_type)
            .await?;

        let matched = matcher.matches(&text);
        debug!(
            "{}: {} of {} keywords matched",
            document.file_name,
            matched.len(),
            matcher.keyword_count()
        );

        Ok(TagResult::new(document.file_name, matched))
    }

    fn log_final_stats(&self, stats: &PipelineStats) {
        info!("=== Tagging Run Summary ===");
        info!("Duration: {} seconds", stats.duration_secs);
        info!("Documents processed: {}", stats.documents_processed);
        info!("Documents with matches: {}", stats.documents_tagged);
        info!("Total keyword matches: {}", stats.tags_matched);
        info!("Tag rate: {:.2}%", stats.tag_rate());
        info!(
            "Processing speed: {:.2} docs/sec",
            stats.documents_per_second()
        );
        info!(
            "Throughput: {:.2} MB/sec",
            stats.bytes_per_second() / 1_048_576.0
        );
        info!("===========================");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_pipeline_creation() {
        let config = Config::default_config();
        let pipeline = TaggingPipeline::new(config);
        assert!(pipeline.is_ok());
    }

    #[test]
    fn test_run_options_default() {
        let options = RunOptions::default();
        assert!(!options.pretty);
        assert!(!options.recursive);
        assert!(options.limit.is_none());
    }
}
