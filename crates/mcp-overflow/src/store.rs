//! Object storage for the full payload of oversized responses.
//!
//! The summarizer only needs two operations: write a blob and hand out a
//! time-limited GET URL for it. [`S3OverflowStore`] talks to S3 or any
//! S3-compatible service (Cloudflare R2 in production);
//! [`MemoryOverflowStore`] keeps blobs in process for tests and local runs.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use datamaker_mcp_core::{Error, Result, StorageConfig};
use secrecy::ExposeSecret;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// User metadata attached to a stored object.
pub type Metadata = BTreeMap<String, String>;

/// Blob store holding overflow payloads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OverflowStore: Send + Sync + std::fmt::Debug {
    /// Writes `bytes` under `key`, replacing any existing object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the backend rejects the write.
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        metadata: Metadata,
    ) -> Result<()>;

    /// Creates a GET URL for `key` valid for `expires_in`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the URL cannot be signed.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String>;
}

/// S3-backed overflow store.
#[derive(Debug, Clone)]
pub struct S3OverflowStore {
    client: Client,
    bucket: String,
}

impl S3OverflowStore {
    /// Wraps an existing S3 client.
    #[must_use]
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Builds a client from storage settings.
    ///
    /// Uses path-style addressing so custom endpoints (R2, `MinIO`) work
    /// without per-bucket DNS. Static credentials are used when configured,
    /// otherwise the default AWS provider chain applies.
    pub async fn connect(config: &StorageConfig) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        if let (Some(access_key_id), Some(secret)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            loader = loader.credentials_provider(Credentials::new(
                access_key_id,
                secret.expose_secret(),
                None,
                None,
                "environment",
            ));
        }

        let shared_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&shared_config)
            .force_path_style(true)
            .build();

        debug!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = ?config.endpoint,
            "S3 overflow store configured"
        );

        Self::new(Client::from_conf(s3_config), config.bucket.clone())
    }

    /// Target bucket.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl OverflowStore for S3OverflowStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        metadata: Metadata,
    ) -> Result<()> {
        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type);

        for (name, value) in metadata {
            request = request.metadata(name, value);
        }

        request
            .send()
            .await
            .map_err(|err| Error::storage("put", format!("{key}: {err}")))?;
        Ok(())
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|err| Error::storage("presign", err.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|err| Error::storage("presign", format!("{key}: {err}")))?;

        Ok(request.uri().to_string())
    }
}

/// A blob held by [`MemoryOverflowStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Raw payload
    pub bytes: Vec<u8>,
    /// MIME type given at write time
    pub content_type: String,
    /// User metadata given at write time
    pub metadata: Metadata,
}

/// In-process overflow store.
///
/// URLs have the form `memory://<bucket>/<key>?expires_in=<secs>` and are
/// only meaningful inside the process.
///
/// # Examples
///
/// ```
/// use datamaker_mcp_overflow::{MemoryOverflowStore, OverflowStore};
/// use std::time::Duration;
///
/// # tokio_test_block_on(async {
/// let store = MemoryOverflowStore::new("local");
/// store.put("a.json", b"[]".to_vec(), "application/json", Default::default()).await.unwrap();
///
/// let url = store.presign_get("a.json", Duration::from_secs(60)).await.unwrap();
/// assert_eq!(url, "memory://local/a.json?expires_in=60");
/// assert!(store.get("a.json").await.is_some());
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryOverflowStore {
    bucket: String,
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryOverflowStore {
    /// Creates an empty store for `bucket`.
    #[must_use]
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Returns a copy of the object stored under `key`.
    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Returns `true` if nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl OverflowStore for MemoryOverflowStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        metadata: Metadata,
    ) -> Result<()> {
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
                metadata,
            },
        );
        Ok(())
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String> {
        if !self.objects.read().await.contains_key(key) {
            return Err(Error::storage("presign", format!("{key}: no such object")));
        }
        Ok(format!(
            "memory://{}/{key}?expires_in={}",
            self.bucket,
            expires_in.as_secs()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_put_then_get() {
        let store = MemoryOverflowStore::new("bucket");
        let mut metadata = Metadata::new();
        metadata.insert("total-count".to_string(), "3".to_string());

        store
            .put("k/1.json", b"[1,2,3]".to_vec(), "application/json", metadata)
            .await
            .unwrap();

        let object = store.get("k/1.json").await.unwrap();
        assert_eq!(object.bytes, b"[1,2,3]");
        assert_eq!(object.content_type, "application/json");
        assert_eq!(object.metadata.get("total-count").map(String::as_str), Some("3"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_store_overwrites() {
        let store = MemoryOverflowStore::new("bucket");
        store.put("k", b"a".to_vec(), "text/plain", Metadata::new()).await.unwrap();
        store.put("k", b"b".to_vec(), "text/plain", Metadata::new()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().bytes, b"b");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_store_presign_requires_object() {
        let store = MemoryOverflowStore::new("bucket");
        assert!(store.is_empty().await);

        let err = store
            .presign_get("missing", Duration::from_secs(10))
            .await
            .unwrap_err();
        assert!(err.is_storage_error());
    }

    #[tokio::test]
    async fn test_memory_store_url_format() {
        let store = MemoryOverflowStore::new("datamaker-chat");
        store.put("templates/x.json", Vec::new(), "application/json", Metadata::new())
            .await
            .unwrap();
        let url = store
            .presign_get("templates/x.json", Duration::from_secs(86_400))
            .await
            .unwrap();
        assert_eq!(url, "memory://datamaker-chat/templates/x.json?expires_in=86400");
    }

    #[tokio::test]
    async fn test_s3_store_presigns_without_network() {
        let config = StorageConfig {
            backend: datamaker_mcp_core::StorageBackend::S3,
            bucket: "overflow".to_string(),
            region: "us-east-1".to_string(),
            endpoint: Some("http://localhost:9000".to_string()),
            access_key_id: Some("AKIDEXAMPLE".to_string()),
            secret_access_key: Some(secrecy::SecretString::from("secret".to_string())),
        };
        let store = S3OverflowStore::connect(&config).await;
        assert_eq!(store.bucket(), "overflow");

        let url = store
            .presign_get("scenarios/s1/2024.json", Duration::from_secs(3600))
            .await
            .unwrap();
        assert!(url.starts_with("http://localhost:9000/overflow/scenarios/s1/2024.json?"));
        assert!(url.contains("X-Amz-Expires=3600"));
        assert!(url.contains("X-Amz-Signature="));
    }
}
