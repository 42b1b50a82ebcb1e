use crate::store_service::{ObjectStore, StoreError};
use async_trait::async_trait;
use aws_sdk_s3 as s3;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;
use std::path::Path;
use tokio::io::AsyncWriteExt;

#[derive(Clone)]
pub struct S3ObjectStore {
    client: s3::Client,
}

impl S3ObjectStore {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: s3::Client::new(sdk_config),
        }
    }
}

fn classify_store_error(
    bucket: &str,
    key: &str,
    code: Option<&str>,
    status: Option<u16>,
    detail: String,
) -> StoreError {
    match (code, status) {
        (Some("NoSuchKey" | "NoSuchBucket" | "NotFound"), _) | (_, Some(404)) => {
            StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }
        }
        (Some("AccessDenied" | "AllAccessDisabled"), _) | (_, Some(403)) => {
            StoreError::AccessDenied {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }
        }
        _ => StoreError::Transport(detail),
    }
}

fn get_object_error(bucket: &str, key: &str, err: SdkError<GetObjectError>) -> StoreError {
    let status = err.raw_response().map(|response| response.status().as_u16());
    let code = match err.as_service_error() {
        Some(service_err) if service_err.is_no_such_key() => Some("NoSuchKey"),
        _ => err.code(),
    };

    classify_store_error(
        bucket,
        key,
        code,
        status,
        DisplayErrorContext(&err).to_string(),
    )
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn download(
        &self,
        bucket: &str,
        key: &str,
        destination: &Path,
    ) -> Result<u64, StoreError> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| get_object_error(bucket, key, e))?;

        let mut body = output.body;
        let mut file = tokio::fs::File::create(destination).await?;
        let mut written = 0u64;
        while let Some(chunk) = body
            .try_next()
            .await
            .map_err(|e| StoreError::Transport(format!("reading object body: {}", e)))?
        {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::debug!("Wrote {} bytes of s3://{}/{} to {:?}", written, bucket, key, destination);

        Ok(written)
    }
}
