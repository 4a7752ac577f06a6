// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod documents;
pub mod error;
pub mod exporter;
pub mod keywords;
pub mod models;
pub mod pipeline;
pub mod service;
pub mod tagger;
pub mod utils;

pub use config::{Config, PipelineConfig, RetryConfig, ServiceConfig, TaggingConfig};
pub use documents::{DocumentScanner, ScannedDocument};
pub use error::{PipelineError, Result};
pub use exporter::{ExportSummary, JsonExporter};
pub use keywords::KeywordLoader;
pub use models::{Document, TagReport, TagResult};
pub use pipeline::{PipelineStats, ProgressTracker, TaggingPipeline};
pub use service::{DocAiClient, Operation, Processor, ProcessorManager, ProcessorType};
pub use tagger::TagMatcher;
pub use utils::{OperationTimer, Validator};
