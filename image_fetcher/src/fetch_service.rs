use crate::{
    config::ScratchConfig,
    scratch::ScratchFile,
    store_service::{ObjectStore, StoreError},
};
use lambda_runtime::Diagnostic;
use pipeline_payload::{encode_image, Envelope, FetchRequest, Payload};
use std::{path::PathBuf, sync::Arc};
use thiserror::Error;
use tracing::instrument;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid fetch request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FetchError {
    pub fn error_type(&self) -> &'static str {
        match self {
            FetchError::InvalidRequest(_) => "INVALID_REQUEST",
            FetchError::Store(StoreError::NotFound { .. }) => "STORAGE_OBJECT_NOT_FOUND",
            FetchError::Store(StoreError::AccessDenied { .. }) => "STORAGE_ACCESS_DENIED",
            FetchError::Store(StoreError::Transport(_) | StoreError::Io(_)) => "STORAGE_ERROR",
        }
    }
}

impl From<FetchError> for Diagnostic {
    fn from(err: FetchError) -> Self {
        Diagnostic {
            error_type: err.error_type().to_string(),
            error_message: err.to_string(),
        }
    }
}

pub struct FetchService<S: ObjectStore> {
    store: Arc<S>,
    scratch_dir: PathBuf,
}

impl<S: ObjectStore> FetchService<S> {
    pub fn new(store: S, scratch: &ScratchConfig) -> Self {
        Self {
            store: Arc::new(store),
            scratch_dir: scratch.dir.clone(),
        }
    }

    #[instrument(skip(self), fields(bucket = %request.storage_bucket, key = %request.storage_key))]
    pub async fn fetch(&self, request: FetchRequest) -> Result<Envelope, FetchError> {
        request.validate().map_err(FetchError::InvalidRequest)?;

        let image = match self.download(&request).await {
            Ok(image) => image,
            Err(e) => {
                tracing::error!("Failed to fetch object: {}", e);
                return Err(e.into());
            }
        };
        let image_data = encode_image(&image);

        tracing::info!("Fetched {} bytes", image.len());

        Ok(Envelope::ok(Payload::new(request, image_data)))
    }

    async fn download(&self, request: &FetchRequest) -> Result<Vec<u8>, StoreError> {
        let scratch = ScratchFile::new(&self.scratch_dir);
        let written = self
            .store
            .download(
                &request.storage_bucket,
                &request.storage_key,
                scratch.path(),
            )
            .await?;
        let image = tokio::fs::read(scratch.path()).await?;

        if image.len() as u64 != written {
            tracing::warn!(
                "Scratch file holds {} bytes, store reported {}",
                image.len(),
                written
            );
        }

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pipeline_payload::decode_image;
    use std::path::Path;
    use std::sync::Mutex;

    struct MockObjectStore {
        object: Option<Vec<u8>>,
        destinations: Mutex<Vec<PathBuf>>,
    }

    impl MockObjectStore {
        fn with_object(object: &[u8]) -> Self {
            Self {
                object: Some(object.to_vec()),
                destinations: Mutex::new(Vec::new()),
            }
        }

        fn empty() -> Self {
            Self {
                object: None,
                destinations: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ObjectStore for Arc<MockObjectStore> {
        async fn download(
            &self,
            bucket: &str,
            key: &str,
            destination: &Path,
        ) -> Result<u64, StoreError> {
            self.destinations
                .lock()
                .unwrap()
                .push(destination.to_path_buf());

            match &self.object {
                Some(object) => {
                    tokio::fs::write(destination, object).await?;
                    Ok(object.len() as u64)
                }
                None => Err(StoreError::NotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                }),
            }
        }
    }

    fn scratch() -> ScratchConfig {
        ScratchConfig {
            dir: std::env::temp_dir(),
        }
    }

    fn request(bucket: &str, key: &str) -> FetchRequest {
        FetchRequest {
            storage_bucket: bucket.to_string(),
            storage_key: key.to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch() -> Result<(), Box<dyn std::error::Error>> {
        let store = Arc::new(MockObjectStore::with_object(b"\x89PNG fake image"));
        let fetch_service = FetchService::new(store.clone(), &scratch());

        let envelope = fetch_service
            .fetch(request("images", "incoming/cat.png"))
            .await?;

        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.body.storage_bucket, "images");
        assert_eq!(envelope.body.storage_key, "incoming/cat.png");
        assert!(envelope.body.inferences.is_empty());
        assert_eq!(
            decode_image(&envelope.body.image_data)?,
            b"\x89PNG fake image"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_scratch_file_released_after_fetch() {
        let store = Arc::new(MockObjectStore::with_object(b"bytes"));
        let fetch_service = FetchService::new(store.clone(), &scratch());

        fetch_service
            .fetch(request("images", "a.png"))
            .await
            .unwrap();

        let destinations = store.destinations.lock().unwrap();
        assert_eq!(destinations.len(), 1);
        assert!(!destinations[0].exists());
    }

    #[tokio::test]
    async fn test_missing_object_is_fatal() {
        let store = Arc::new(MockObjectStore::empty());
        let fetch_service = FetchService::new(store.clone(), &scratch());

        let err = fetch_service
            .fetch(request("images", "missing.png"))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Store(StoreError::NotFound { .. })));
        assert_eq!(err.error_type(), "STORAGE_OBJECT_NOT_FOUND");
        let destinations = store.destinations.lock().unwrap();
        assert!(!destinations[0].exists());
    }

    #[tokio::test]
    async fn test_blank_key_never_reaches_store() {
        let store = Arc::new(MockObjectStore::with_object(b"bytes"));
        let fetch_service = FetchService::new(store.clone(), &scratch());

        let err = fetch_service
            .fetch(request("images", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::InvalidRequest(_)));
        assert!(store.destinations.lock().unwrap().is_empty());
    }

    #[test]
    fn test_diagnostic_carries_error_type() {
        let err = FetchError::Store(StoreError::AccessDenied {
            bucket: "images".to_string(),
            key: "a.png".to_string(),
        });

        let diagnostic = Diagnostic::from(err);

        assert_eq!(diagnostic.error_type, "STORAGE_ACCESS_DENIED");
        assert_eq!(
            diagnostic.error_message,
            "Access to s3://images/a.png was denied"
        );
    }
}
