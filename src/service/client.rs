// file: src/service/client.rs
// description: HTTP client for the remote document-processing service
// reference: https://cloud.google.com/document-ai/docs/reference/rest

use crate::config::{PipelineConfig, ServiceConfig};
use crate::error::{PipelineError, Result};
use crate::service::resources::{
    self, ErrorEnvelope, ProcessRequest, ProcessResponse, RawDocument,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT_SECS: u64 = 120;

pub struct DocAiClient {
    http: Client,
    service: ServiceConfig,
    pipeline: PipelineConfig,
}

impl DocAiClient {
    pub fn new(service: ServiceConfig, pipeline: PipelineConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            service,
            pipeline,
        })
    }

    /// The API endpoint is keyed by location unless an override is set.
    pub fn endpoint(&self) -> String {
        match &self.service.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!(
                "https://{}-documentai.googleapis.com/v1",
                self.service.location
            ),
        }
    }

    pub fn service_config(&self) -> &ServiceConfig {
        &self.service
    }

    pub(crate) fn pipeline_config(&self) -> &PipelineConfig {
        &self.pipeline
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Full resource name of the configured processor (or processor version).
    pub fn processor_name(&self) -> String {
        match &self.service.processor_version {
            Some(version) => resources::processor_version_path(
                &self.service.project_id,
                &self.service.location,
                &self.service.processor_id,
                version,
            ),
            None => resources::processor_path(
                &self.service.project_id,
                &self.service.location,
                &self.service.processor_id,
            ),
        }
    }

    fn access_token(&self) -> Result<&str> {
        self.service
            .access_token
            .as_deref()
            .ok_or_else(|| {
                PipelineError::Config(
                    "service.access_token is not set (DOCTAG__SERVICE__ACCESS_TOKEN)".to_string(),
                )
            })
    }

    /// Send a request, decoding the JSON body on success and the service's
    /// error envelope on failure.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = builder.bearer_auth(self.access_token()?).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_error(status.as_u16(), &body));
        }

        response.json::<T>().await.map_err(PipelineError::Http)
    }

    /// Classify a non-success response. FAILED_PRECONDITION gets its own kind
    /// so enable/disable callers can recognize and swallow it.
    pub(crate) fn map_error(status: u16, body: &str) -> PipelineError {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => {
                if envelope.error.status.as_deref() == Some("FAILED_PRECONDITION") {
                    PipelineError::PreconditionFailed(envelope.error.message)
                } else {
                    PipelineError::Remote {
                        status,
                        message: envelope.error.message,
                    }
                }
            }
            Err(_) => PipelineError::Remote {
                status,
                message: body.trim().to_string(),
            },
        }
    }

    /// Submit a raw document and return its extracted text.
    ///
    /// Transient failures (429, 5xx, connect/timeout) are retried with
    /// exponential backoff; anything else propagates and aborts the run.
    pub async fn process_document(&self, payload: &[u8], mime_type: &str) -> Result<String> {
        let url = format!("{}/{}:process", self.endpoint(), self.processor_name());

        let request = ProcessRequest {
            raw_document: RawDocument {
                content: BASE64.encode(payload),
                mime_type: mime_type.to_string(),
            },
            field_mask: self.pipeline.field_mask.clone(),
        };

        debug!(
            "Submitting {} bytes ({}) for processing",
            payload.len(),
            mime_type
        );

        let retry = &self.pipeline.retry;
        let mut backoff = Duration::from_millis(retry.initial_backoff_ms);
        let max_backoff = Duration::from_millis(retry.max_backoff_ms);
        let mut attempt = 0;

        loop {
            attempt += 1;

            let result: Result<ProcessResponse> = self
                .execute(self.http.post(&url).json(&request))
                .await;

            match result {
                Ok(response) => {
                    let text = response
                        .document
                        .and_then(|d| d.text)
                        .unwrap_or_default();
                    debug!("Received {} chars of extracted text", text.len());
                    return Ok(text);
                }
                Err(err) if err.is_transient() && attempt < retry.max_attempts => {
                    warn!(
                        "Transient processing failure (attempt {}/{}): {}. Retrying in {:?}",
                        attempt, retry.max_attempts, err, backoff
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = (backoff * 2).min(max_backoff);
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;

    fn client_with(endpoint: Option<&str>) -> DocAiClient {
        let config = Config::default_config();
        let mut service = config.service.clone();
        service.endpoint = endpoint.map(str::to_string);
        DocAiClient::new(service, config.pipeline).unwrap()
    }

    #[test]
    fn test_endpoint_derived_from_location() {
        let client = client_with(None);
        assert_eq!(client.endpoint(), "https://eu-documentai.googleapis.com/v1");
    }

    #[test]
    fn test_endpoint_override_wins() {
        let client = client_with(Some("http://localhost:8089/v1/"));
        assert_eq!(client.endpoint(), "http://localhost:8089/v1");
    }

    #[test]
    fn test_processor_name_uses_configured_ids() {
        let client = client_with(None);
        assert_eq!(
            client.processor_name(),
            "projects/welexit-attempt/locations/eu/processors/823b06a76761e433"
        );
    }

    #[test]
    fn test_processor_version_extends_name() {
        let config = Config::default_config();
        let mut service = config.service.clone();
        service.processor_version = Some("pretrained-ocr-v2".to_string());
        let client = DocAiClient::new(service, config.pipeline).unwrap();

        assert!(
            client
                .processor_name()
                .ends_with("/processorVersions/pretrained-ocr-v2")
        );
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let client = client_with(None);
        assert!(matches!(
            client.access_token(),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn test_map_error_failed_precondition() {
        let body = r#"{"error": {"code": 9, "message": "Processor is already enabled", "status": "FAILED_PRECONDITION"}}"#;
        let err = DocAiClient::map_error(400, body);
        assert!(matches!(err, PipelineError::PreconditionFailed(_)));
    }

    #[test]
    fn test_map_error_remote_with_envelope() {
        let body = r#"{"error": {"code": 7, "message": "Permission denied", "status": "PERMISSION_DENIED"}}"#;
        let err = DocAiClient::map_error(403, body);
        match err {
            PipelineError::Remote { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Permission denied");
            }
            other => panic!("expected Remote, got {:?}", other),
        }
    }

    #[test]
    fn test_map_error_non_json_body() {
        let err = DocAiClient::map_error(502, "Bad Gateway");
        match err {
            PipelineError::Remote { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
                assert!(err_transient(status));
            }
            other => panic!("expected Remote, got {:?}", other),
        }
    }

    fn err_transient(status: u16) -> bool {
        PipelineError::Remote {
            status,
            message: String::new(),
        }
        .is_transient()
    }
}
