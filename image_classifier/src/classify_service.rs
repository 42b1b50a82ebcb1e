use crate::endpoint_service::{EndpointError, InferenceEndpoint};
use lambda_runtime::Diagnostic;
use pipeline_payload::{decode_image, Envelope};
use std::sync::Arc;
use thiserror::Error;
use tracing::instrument;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Payload carries no image data")]
    MissingImage,
    #[error("Image data is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    #[error("Endpoint response is not a list of scores: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl ClassifyError {
    pub fn error_type(&self) -> &'static str {
        match self {
            ClassifyError::MissingImage | ClassifyError::Decode(_) => "INVALID_IMAGE_DATA",
            ClassifyError::Endpoint(_) => "INFERENCE_ENDPOINT_ERROR",
            ClassifyError::MalformedResponse(_) => "INFERENCE_RESPONSE_MALFORMED",
        }
    }
}

impl From<ClassifyError> for Diagnostic {
    fn from(err: ClassifyError) -> Self {
        Diagnostic {
            error_type: err.error_type().to_string(),
            error_message: err.to_string(),
        }
    }
}

fn parse_inferences(response: &[u8]) -> Result<Vec<f64>, ClassifyError> {
    Ok(serde_json::from_slice::<Vec<f64>>(response)?)
}

pub struct ClassifyService<E: InferenceEndpoint> {
    endpoint: Arc<E>,
}

impl<E: InferenceEndpoint> ClassifyService<E> {
    pub fn new(endpoint: E) -> Self {
        Self {
            endpoint: Arc::new(endpoint),
        }
    }

    #[instrument(skip(self, envelope), fields(bucket = %envelope.body.storage_bucket, key = %envelope.body.storage_key))]
    pub async fn classify(&self, envelope: Envelope) -> Result<Envelope, ClassifyError> {
        let payload = envelope.body;
        if payload.image_data.trim().is_empty() {
            return Err(ClassifyError::MissingImage);
        }
        let image = decode_image(&payload.image_data)?;

        let response = match self.endpoint.invoke(image).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Inference failed: {}", e);
                return Err(e.into());
            }
        };
        let inferences = parse_inferences(&response)?;

        let payload = payload.with_inferences(inferences);
        tracing::info!(
            "Received {} scores, best {:?}",
            payload.inferences.len(),
            payload.best_score()
        );

        Ok(Envelope::ok(payload))
    }
}
