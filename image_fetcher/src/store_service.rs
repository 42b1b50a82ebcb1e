use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Object s3://{bucket}/{key} does not exist")]
    NotFound { bucket: String, key: String },
    #[error("Access to s3://{bucket}/{key} was denied")]
    AccessDenied { bucket: String, key: String },
    #[error("Object storage request failed: {0}")]
    Transport(String),
    #[error("Scratch file IO failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Downloads a single object into local scratch space.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Writes the object to `destination` and returns the number of bytes written.
    async fn download(&self, bucket: &str, key: &str, destination: &Path)
        -> Result<u64, StoreError>;
}
