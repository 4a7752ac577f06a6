// file: src/service/processors.rs
// description: processor lifecycle operations against the document service
// reference: https://cloud.google.com/document-ai/docs/reference/rest

use crate::error::Result;
use crate::service::client::DocAiClient;
use crate::service::operations;
use crate::service::resources::{
    self, FetchProcessorTypesResponse, ListProcessorsResponse, Operation, Processor,
    ProcessorSpec, ProcessorType,
};
use tracing::{debug, info};

/// CRUD surface over the service's processor resources. Pure pass-through
/// remote calls; no local state.
pub struct ProcessorManager<'a> {
    client: &'a DocAiClient,
}

impl<'a> ProcessorManager<'a> {
    pub fn new(client: &'a DocAiClient) -> Self {
        Self { client }
    }

    fn parent(&self) -> String {
        let service = self.client.service_config();
        resources::common_location_path(&service.project_id, &service.location)
    }

    fn processor_name(&self, processor_id: &str) -> String {
        let service = self.client.service_config();
        resources::processor_path(&service.project_id, &service.location, processor_id)
    }

    /// Processor types available for instantiation in this project/location.
    /// Only creatable types are returned.
    pub async fn fetch_processor_types(&self) -> Result<Vec<ProcessorType>> {
        let url = format!(
            "{}/{}:fetchProcessorTypes",
            self.client.endpoint(),
            self.parent()
        );

        let response: FetchProcessorTypesResponse =
            self.client.execute(self.client.http().get(&url)).await?;

        Ok(response
            .processor_types
            .into_iter()
            .filter(|t| t.allow_creation)
            .collect())
    }

    /// All configured processor instances, following pagination to the end.
    pub async fn list_processors(&self) -> Result<Vec<Processor>> {
        let url = format!("{}/{}/processors", self.client.endpoint(), self.parent());

        let mut processors = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.client.http().get(&url);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response: ListProcessorsResponse = self.client.execute(request).await?;
            processors.extend(response.processors);

            match response.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!("Listed {} processors", processors.len());
        Ok(processors)
    }

    pub async fn get_processor(&self, processor_id: &str) -> Result<Processor> {
        let url = format!(
            "{}/{}",
            self.client.endpoint(),
            self.processor_name(processor_id)
        );

        self.client.execute(self.client.http().get(&url)).await
    }

    pub async fn create_processor(
        &self,
        display_name: &str,
        processor_type: &str,
    ) -> Result<Processor> {
        let url = format!("{}/{}/processors", self.client.endpoint(), self.parent());

        let spec = ProcessorSpec {
            display_name: display_name.to_string(),
            processor_type: processor_type.to_string(),
        };

        let processor: Processor = self
            .client
            .execute(self.client.http().post(&url).json(&spec))
            .await?;

        info!("Created processor {}", processor.name);
        Ok(processor)
    }

    /// Enabling an already-enabled processor fails with PreconditionFailed;
    /// callers decide whether to swallow it.
    pub async fn enable_processor(&self, processor_id: &str) -> Result<()> {
        let url = format!(
            "{}/{}:enable",
            self.client.endpoint(),
            self.processor_name(processor_id)
        );

        let operation: Operation = self
            .client
            .execute(self.client.http().post(&url).json(&serde_json::json!({})))
            .await?;

        info!("Enable operation started: {}", operation.name);
        operations::wait_for_operation(self.client, operation).await?;
        Ok(())
    }

    pub async fn disable_processor(&self, processor_id: &str) -> Result<()> {
        let url = format!(
            "{}/{}:disable",
            self.client.endpoint(),
            self.processor_name(processor_id)
        );

        let operation: Operation = self
            .client
            .execute(self.client.http().post(&url).json(&serde_json::json!({})))
            .await?;

        info!("Disable operation started: {}", operation.name);
        operations::wait_for_operation(self.client, operation).await?;
        Ok(())
    }

    pub async fn delete_processor(&self, processor_id: &str) -> Result<()> {
        let url = format!(
            "{}/{}",
            self.client.endpoint(),
            self.processor_name(processor_id)
        );

        let operation: Operation = self
            .client
            .execute(self.client.http().delete(&url))
            .await?;

        info!("Delete operation started: {}", operation.name);
        operations::wait_for_operation(self.client, operation).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;

    fn manager_fixture() -> DocAiClient {
        let config = Config::default_config();
        DocAiClient::new(config.service, config.pipeline).unwrap()
    }

    #[test]
    fn test_parent_path() {
        let client = manager_fixture();
        let manager = ProcessorManager::new(&client);
        assert_eq!(manager.parent(), "projects/welexit-attempt/locations/eu");
    }

    #[test]
    fn test_processor_name_uses_argument_id() {
        let client = manager_fixture();
        let manager = ProcessorManager::new(&client);
        assert_eq!(
            manager.processor_name("feedbeef00112233"),
            "projects/welexit-attempt/locations/eu/processors/feedbeef00112233"
        );
    }
}
