use async_trait::async_trait;
use thiserror::Error;

pub const IMAGE_CONTENT_TYPE: &str = "image/png";

#[derive(Error, Debug)]
pub enum EndpointError {
    #[error("Invoking endpoint {endpoint} failed: {detail}")]
    Invocation { endpoint: String, detail: String },
    #[error("Model behind endpoint {endpoint} returned status {status:?}: {message}")]
    Model {
        endpoint: String,
        status: Option<i32>,
        message: String,
    },
}

#[async_trait]
pub trait InferenceEndpoint: Send + Sync + 'static {
    /// Sends the raw image and returns the raw response body.
    async fn invoke(&self, image: Vec<u8>) -> Result<Vec<u8>, EndpointError>;
}
