use crate::{
    config::EndpointConfig,
    endpoint_service::{EndpointError, InferenceEndpoint, IMAGE_CONTENT_TYPE},
};
use async_trait::async_trait;
use aws_sdk_sagemakerruntime as sagemaker;
use aws_sdk_sagemakerruntime::error::DisplayErrorContext;
use aws_sdk_sagemakerruntime::operation::invoke_endpoint::InvokeEndpointError;
use aws_sdk_sagemakerruntime::primitives::Blob;

#[derive(Clone)]
pub struct SageMakerEndpoint {
    client: sagemaker::Client,
    endpoint_name: String,
}

impl SageMakerEndpoint {
    pub fn new(sdk_config: &aws_config::SdkConfig, endpoint_config: &EndpointConfig) -> Self {
        Self {
            client: sagemaker::Client::new(sdk_config),
            endpoint_name: endpoint_config.name.clone(),
        }
    }
}

fn endpoint_error(
    endpoint: &str,
    service_error: Option<&InvokeEndpointError>,
    detail: String,
) -> EndpointError {
    match service_error {
        Some(InvokeEndpointError::ModelError(model_error)) => EndpointError::Model {
            endpoint: endpoint.to_string(),
            status: model_error.original_status_code(),
            message: model_error
                .original_message()
                .unwrap_or_default()
                .to_string(),
        },
        _ => EndpointError::Invocation {
            endpoint: endpoint.to_string(),
            detail,
        },
    }
}

fn response_body(endpoint: &str, body: Option<Blob>) -> Result<Vec<u8>, EndpointError> {
    body.map(Blob::into_inner)
        .ok_or_else(|| EndpointError::Invocation {
            endpoint: endpoint.to_string(),
            detail: "response has no body".to_string(),
        })
}

#[async_trait]
impl InferenceEndpoint for SageMakerEndpoint {
    async fn invoke(&self, image: Vec<u8>) -> Result<Vec<u8>, EndpointError> {
        tracing::debug!(
            "Invoking endpoint {} with {} bytes",
            self.endpoint_name,
            image.len()
        );

        let output = self
            .client
            .invoke_endpoint()
            .endpoint_name(&self.endpoint_name)
            .content_type(IMAGE_CONTENT_TYPE)
            .body(Blob::new(image))
            .send()
            .await
            .map_err(|e| {
                endpoint_error(
                    &self.endpoint_name,
                    e.as_service_error(),
                    DisplayErrorContext(&e).to_string(),
                )
            })?;

        response_body(&self.endpoint_name, output.body)
    }
}
