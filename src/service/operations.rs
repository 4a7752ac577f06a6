// file: src/service/operations.rs
// description: long-running operation polling
// reference: https://cloud.google.com/document-ai/docs/long-running-operations

use crate::error::{PipelineError, Result};
use crate::service::client::DocAiClient;
use crate::service::resources::Operation;
use std::time::Duration;
use tracing::debug;

/// Poll an operation until it completes, at the configured interval, giving
/// up after the configured attempt cap.
pub async fn wait_for_operation(client: &DocAiClient, operation: Operation) -> Result<Operation> {
    let pipeline = client.pipeline_config();
    let interval = Duration::from_millis(pipeline.poll_interval_ms);

    let mut current = operation;

    for attempt in 0..pipeline.poll_attempts {
        if current.done {
            return finished(current);
        }

        debug!(
            "Operation {} pending (poll {}/{})",
            current.name,
            attempt + 1,
            pipeline.poll_attempts
        );
        tokio::time::sleep(interval).await;

        let url = format!("{}/{}", client.endpoint(), current.name);
        current = client.execute(client.http().get(&url)).await?;
    }

    if current.done {
        return finished(current);
    }

    Err(PipelineError::OperationFailed {
        name: current.name,
        message: format!(
            "not done after {} polls at {}ms",
            pipeline.poll_attempts, pipeline.poll_interval_ms
        ),
    })
}

fn finished(operation: Operation) -> Result<Operation> {
    match &operation.error {
        Some(status) => Err(PipelineError::OperationFailed {
            name: operation.name.clone(),
            message: status.message.clone(),
        }),
        None => {
            debug!("Operation {} complete", operation.name);
            Ok(operation)
        }
    }
}
