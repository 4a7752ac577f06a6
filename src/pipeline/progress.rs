// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for pipeline execution
// reference: uses indicatif for progress bars and tracks processing metrics

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    pub documents_processed: usize,
    pub documents_tagged: usize,
    pub tags_matched: usize,
    pub total_bytes_processed: u64,
    pub duration_secs: u64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents_per_second(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.documents_processed as f64 / self.duration_secs as f64
    }

    pub fn bytes_per_second(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.total_bytes_processed as f64 / self.duration_secs as f64
    }

    pub fn tag_rate(&self) -> f64 {
        if self.documents_processed == 0 {
            return 0.0;
        }
        (self.documents_tagged as f64 / self.documents_processed as f64) * 100.0
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    documents_processed: Arc<AtomicUsize>,
    documents_tagged: Arc<AtomicUsize>,
    tags_matched: Arc<AtomicUsize>,
    bytes_processed: Arc<AtomicU64>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_documents: usize) -> Self {
        Self::with_color(total_documents, true)
    }

    pub fn with_color(total_documents: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, total_documents as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            documents_processed: Arc::new(AtomicUsize::new(0)),
            documents_tagged: Arc::new(AtomicUsize::new(0)),
            tags_matched: Arc::new(AtomicUsize::new(0)),
            bytes_processed: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_documents_processed(&self) {
        self.documents_processed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn add_tags_matched(&self, count: usize) {
        if count > 0 {
            self.documents_tagged.fetch_add(1, Ordering::SeqCst);
            self.tags_matched.fetch_add(count, Ordering::SeqCst);
        }
        self.update_detail_bar();
    }

    pub fn add_bytes_processed(&self, bytes: u64) {
        self.bytes_processed.fetch_add(bytes, Ordering::SeqCst);
    }

    pub fn set_message(&self, message: String) {
        self.detail_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Tagging complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> PipelineStats {
        let duration = self.start_time.elapsed().as_secs();

        PipelineStats {
            documents_processed: self.documents_processed.load(Ordering::SeqCst),
            documents_tagged: self.documents_tagged.load(Ordering::SeqCst),
            tags_matched: self.tags_matched.load(Ordering::SeqCst),
            total_bytes_processed: self.bytes_processed.load(Ordering::SeqCst),
            duration_secs: duration,
        }
    }

    fn update_detail_bar(&self) {
        let tagged = self.documents_tagged.load(Ordering::SeqCst);
        let tags = self.tags_matched.load(Ordering::SeqCst);

        let message = format!("Tagged: {} | Matches: {}", tagged, tags);

        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    if colored {
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                )
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
    } else {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("=>-"),
        );
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .expect("Failed to create detail bar template");
    bar.set_style(style);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_stats_calculations() {
        let mut stats = PipelineStats::new();
        stats.documents_processed = 100;
        stats.documents_tagged = 40;
        stats.duration_secs = 10;
        stats.total_bytes_processed = 1000;

        assert_eq!(stats.documents_per_second(), 10.0);
        assert_eq!(stats.bytes_per_second(), 100.0);
        assert_eq!(stats.tag_rate(), 40.0);
    }

    #[test]
    fn test_pipeline_stats_zero_duration() {
        let stats = PipelineStats::new();
        assert_eq!(stats.documents_per_second(), 0.0);
        assert_eq!(stats.bytes_per_second(), 0.0);
        assert_eq!(stats.tag_rate(), 0.0);
    }

    #[test]
    fn test_progress_tracker_increment() {
        let tracker = ProgressTracker::new(100);

        tracker.inc_documents_processed();
        tracker.add_bytes_processed(1024);
        tracker.add_tags_matched(3);

        let stats = tracker.get_stats();
        assert_eq!(stats.documents_processed, 1);
        assert_eq!(stats.documents_tagged, 1);
        assert_eq!(stats.tags_matched, 3);
        assert_eq!(stats.total_bytes_processed, 1024);
    }

    #[test]
    fn test_untagged_document_not_counted_as_tagged() {
        let tracker = ProgressTracker::new(10);

        tracker.inc_documents_processed();
        tracker.add_tags_matched(0);

        let stats = tracker.get_stats();
        assert_eq!(stats.documents_processed, 1);
        assert_eq!(stats.documents_tagged, 0);
    }
}
