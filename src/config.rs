// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub pipeline: PipelineConfig,
    pub tagging: TaggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub project_id: String,
    pub location: String,
    pub processor_id: String,
    #[serde(default)]
    pub processor_version: Option<String>,
    /// Override for the location-derived endpoint, mainly for tests.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    pub mime_type: String,
    #[serde(default)]
    pub field_mask: Option<String>,
    pub max_file_size_mb: usize,
    pub retry: RetryConfig,
    pub poll_interval_ms: u64,
    pub poll_attempts: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    pub max_attempts: usize,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaggingConfig {
    pub keywords_path: PathBuf,
    pub documents_dir: PathBuf,
    pub output_path: PathBuf,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("DOCTAG")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            service: ServiceConfig {
                project_id: "welexit-attempt".to_string(),
                location: "eu".to_string(),
                processor_id: "823b06a76761e433".to_string(),
                processor_version: None,
                endpoint: None,
                access_token: None,
            },
            pipeline: PipelineConfig {
                mime_type: "application/pdf".to_string(),
                field_mask: None,
                max_file_size_mb: 20,
                retry: RetryConfig {
                    max_attempts: 3,
                    initial_backoff_ms: 500,
                    max_backoff_ms: 8_000,
                },
                poll_interval_ms: 1_000,
                poll_attempts: 60,
            },
            tagging: TaggingConfig {
                keywords_path: PathBuf::from("data/keywords.xlsx"),
                documents_dir: PathBuf::from("data/pdf_files"),
                output_path: PathBuf::from("data/tags.json"),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.service.project_id.trim().is_empty() {
            return Err(PipelineError::Config(
                "service.project_id must not be empty".to_string(),
            ));
        }

        Validator::validate_location(&self.service.location)
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        Validator::validate_processor_id(&self.service.processor_id)
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        Validator::validate_mime_type(&self.pipeline.mime_type)
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        if self.pipeline.retry.max_attempts == 0 {
            return Err(PipelineError::Config(
                "pipeline.retry.max_attempts must be greater than 0".to_string(),
            ));
        }

        if self.pipeline.poll_attempts == 0 {
            return Err(PipelineError::Config(
                "pipeline.poll_attempts must be greater than 0".to_string(),
            ));
        }

        if self.pipeline.max_file_size_mb == 0 {
            return Err(PipelineError::Config(
                "pipeline.max_file_size_mb must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_project_id_rejected() {
        let mut config = Config::default_config();
        config.service.project_id = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_location_rejected() {
        let mut config = Config::default_config();
        config.service.location = "EU region".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_retry_attempts_rejected() {
        let mut config = Config::default_config();
        config.pipeline.retry.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_mime_type_rejected() {
        let mut config = Config::default_config();
        config.pipeline.mime_type = "application/msword-legacy".to_string();
        assert!(config.validate().is_err());
    }
}
