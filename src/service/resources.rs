// file: src/service/resources.rs
// description: resource path builders and wire types for the document service API
// reference: https://cloud.google.com/document-ai/docs/reference/rest

use serde::{Deserialize, Serialize};

/// `projects/{project}/locations/{location}`
pub fn common_location_path(project_id: &str, location: &str) -> String {
    format!("projects/{}/locations/{}", project_id, location)
}

/// `projects/{project}/locations/{location}/processors/{processor}`
pub fn processor_path(project_id: &str, location: &str, processor_id: &str) -> String {
    format!(
        "{}/processors/{}",
        common_location_path(project_id, location),
        processor_id
    )
}

/// `.../processors/{processor}/processorVersions/{version}`
pub fn processor_version_path(
    project_id: &str,
    location: &str,
    processor_id: &str,
    version_id: &str,
) -> String {
    format!(
        "{}/processorVersions/{}",
        processor_path(project_id, location, processor_id),
        version_id
    )
}

/// A configured processor instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Processor {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(rename = "type", default)]
    pub processor_type: String,
    #[serde(default)]
    pub state: Option<String>,
}

impl Processor {
    /// Trailing id segment of the full resource name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// A processor template that can be instantiated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorType {
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub allow_creation: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchProcessorTypesResponse {
    #[serde(default)]
    pub processor_types: Vec<ProcessorType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProcessorsResponse {
    #[serde(default)]
    pub processors: Vec<Processor>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorSpec {
    pub display_name: String,
    #[serde(rename = "type")]
    pub processor_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    /// Base64-encoded document payload.
    pub content: String,
    pub mime_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub raw_document: RawDocument,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_mask: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    #[serde(default)]
    pub document: Option<ExtractedDocument>,
}

/// Only `text` is consumed; entities and pages are left on the floor.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    #[serde(default)]
    pub text: Option<String>,
}

/// A long-running operation handle returned by enable/disable/delete.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<Status>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Error body shape: `{"error": {"code": .., "message": .., "status": ..}}`
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: Status,
}
