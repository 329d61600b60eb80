use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no document under key '{0}'")]
    NotFound(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Staging store for candidate documents.
///
/// Carried in `AppState` as `Arc<dyn DocumentStore>` so tests can swap in an
/// in-memory store. One run brackets one key: uploaded by the caller, fetched
/// at run start, deleted on every exit path.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn upload(&self, key: &str, bytes: Bytes) -> Result<(), StoreError>;
    async fn fetch(&self, key: &str) -> Result<Bytes, StoreError>;
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Production store backed by the S3 staging bucket.
pub struct S3DocumentStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3DocumentStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl DocumentStore for S3DocumentStore {
    async fn upload(&self, key: &str, bytes: Bytes) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type("application/pdf")
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.into_service_error().to_string()))?;

        info!("Staged document at s3://{}/{}", self.bucket, key);
        Ok(())
    }

    async fn fetch(&self, key: &str) -> Result<Bytes, StoreError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service = e.into_service_error();
                if service.is_no_such_key() {
                    StoreError::NotFound(key.to_string())
                } else {
                    StoreError::Backend(service.to_string())
                }
            })?;

        let aggregated = output
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(aggregated.into_bytes())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.into_service_error().to_string()))?;

        info!("Released staged document s3://{}/{}", self.bucket, key);
        Ok(())
    }
}

/// In-memory store used across the crate's tests.
/// Deletions are recorded so tests can assert cleanup ran.
#[cfg(test)]
pub(crate) struct MemoryStore {
    objects: std::sync::Mutex<std::collections::HashMap<String, Bytes>>,
    deleted: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub(crate) fn empty() -> Self {
        Self {
            objects: std::sync::Mutex::new(std::collections::HashMap::new()),
            deleted: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with(key: &str, bytes: Vec<u8>) -> Self {
        let store = Self::empty();
        store
            .objects
            .lock()
            .unwrap()
            .insert(key.to_string(), Bytes::from(bytes));
        store
    }

    pub(crate) fn deleted_keys(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl DocumentStore for MemoryStore {
    async fn upload(&self, key: &str, bytes: Bytes) -> Result<(), StoreError> {
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
        Ok(())
    }

    async fn fetch(&self, key: &str) -> Result<Bytes, StoreError> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        // Mirrors S3 semantics: deleting an absent key succeeds.
        self.objects.lock().unwrap().remove(key);
        self.deleted.lock().unwrap().push(key.to_string());
        Ok(())
    }
}
