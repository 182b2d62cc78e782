//! `MediaStore`: object access plus presigned URLs for direct client uploads.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use http::Method;
use object_store::ObjectStore;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::signer::Signer;
use vit_config::StorageConfig;

use crate::error::StorageError;

/// A presigned request the client performs directly against the bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedRequest {
    pub url: String,
    pub method: String,
    /// Headers the client must send with the request.
    pub headers: Vec<(String, String)>,
    pub expires_at: DateTime<Utc>,
}

/// Media object storage.
///
/// Built over S3 (or any S3-compatible endpoint) in production. The in-memory
/// variant backs tests and unconfigured local runs; it stores objects but
/// cannot presign.
#[derive(Clone)]
pub struct MediaStore {
    store: Arc<dyn ObjectStore>,
    signer: Option<Arc<AmazonS3>>,
    public_base_url: Option<String>,
    presign_ttl: Duration,
    max_upload_bytes: u64,
}

impl std::fmt::Debug for MediaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaStore")
            .field("store", &self.store.to_string())
            .field("can_presign", &self.signer.is_some())
            .field("public_base_url", &self.public_base_url)
            .finish_non_exhaustive()
    }
}

impl MediaStore {
    /// Build an S3-backed store from config.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotConfigured` when bucket or credentials are
    /// missing, or an object store error if the client cannot be built.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        if !config.is_configured() {
            return Err(StorageError::NotConfigured(
                "storage.bucket, storage.access_key_id and storage.secret_access_key are required"
                    .into(),
            ));
        }

        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region)
            .with_access_key_id(&config.access_key_id)
            .with_secret_access_key(&config.secret_access_key)
            .with_allow_http(config.allow_http)
            .with_virtual_hosted_style_request(!config.path_style);
        if !config.endpoint.is_empty() {
            builder = builder.with_endpoint(&config.endpoint);
        }
        let s3 = Arc::new(builder.build()?);

        tracing::debug!(
            bucket = %config.bucket,
            endpoint = %config.endpoint,
            path_style = config.path_style,
            "media store configured"
        );

        Ok(Self {
            store: s3.clone(),
            signer: Some(s3),
            public_base_url: non_empty(&config.public_base_url),
            presign_ttl: Duration::from_secs(config.presign_ttl_secs),
            max_upload_bytes: config.max_upload_bytes,
        })
    }

    /// In-memory store without presigning, using the limits from `config`.
    #[must_use]
    pub fn in_memory(config: &StorageConfig) -> Self {
        Self {
            store: Arc::new(InMemory::new()),
            signer: None,
            public_base_url: non_empty(&config.public_base_url),
            presign_ttl: Duration::from_secs(config.presign_ttl_secs),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    /// S3 store when configured, otherwise in-memory with a warning.
    ///
    /// # Errors
    ///
    /// Returns an object store error if a configured client cannot be built.
    pub fn from_config_or_memory(config: &StorageConfig) -> Result<Self, StorageError> {
        if config.is_configured() {
            Self::from_config(config)
        } else {
            tracing::warn!("storage not configured; media uploads cannot be presigned");
            Ok(Self::in_memory(config))
        }
    }

    /// Whether presigned URLs can be produced.
    #[must_use]
    pub const fn can_presign(&self) -> bool {
        self.signer.is_some()
    }

    #[must_use]
    pub const fn presign_ttl(&self) -> Duration {
        self.presign_ttl
    }

    #[must_use]
    pub const fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    /// Underlying object store, for seeding objects in tests and tools.
    #[must_use]
    pub fn object_store(&self) -> Arc<dyn ObjectStore> {
        Arc::clone(&self.store)
    }

    /// Presign a `PUT` for `key`. The client must send `content-type`.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` without a signer, or `InvalidKey`.
    pub async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<PresignedRequest, StorageError> {
        let url = self.sign(Method::PUT, key, ttl).await?;
        Ok(PresignedRequest {
            url,
            method: Method::PUT.to_string(),
            headers: vec![("content-type".to_string(), content_type.to_string())],
            expires_at: expires_at(ttl),
        })
    }

    /// Presign a `GET` for `key`.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` without a signer, or `InvalidKey`.
    pub async fn presign_get(
        &self,
        key: &str,
        ttl: Duration,
    ) -> Result<PresignedRequest, StorageError> {
        let url = self.sign(Method::GET, key, ttl).await?;
        Ok(PresignedRequest {
            url,
            method: Method::GET.to_string(),
            headers: Vec::new(),
            expires_at: expires_at(ttl),
        })
    }

    /// URL a client can fetch `key` from: `{public_base_url}/{key}` when a
    /// public base is configured, else a presigned `GET`, else `None`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` or a signing error.
    pub async fn download_url(&self, key: &str) -> Result<Option<String>, StorageError> {
        if let Some(ref base) = self.public_base_url {
            return Ok(Some(format!("{}/{}", base.trim_end_matches('/'), key)));
        }
        if self.signer.is_none() {
            return Ok(None);
        }
        Ok(Some(self.presign_get(key, self.presign_ttl).await?.url))
    }

    /// Size of the stored object, or `None` if nothing was uploaded.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` or an object store error other than not-found.
    pub async fn head(&self, key: &str) -> Result<Option<u64>, StorageError> {
        let path = parse_key(key)?;
        match self.store.head(&path).await {
            Ok(meta) => Ok(Some(meta.size)),
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the object at `key`. A missing object is not an error.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` or an object store error other than not-found.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = parse_key(key)?;
        match self.store.delete(&path).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn sign(&self, method: Method, key: &str, ttl: Duration) -> Result<String, StorageError> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            StorageError::NotConfigured("presigned URLs require S3 credentials".into())
        })?;
        let path = parse_key(key)?;
        let url = signer.signed_url(method, &path, ttl).await?;
        Ok(url.to_string())
    }
}

fn parse_key(key: &str) -> Result<Path, StorageError> {
    Path::parse(key).map_err(|e| StorageError::InvalidKey {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn expires_at(ttl: Duration) -> DateTime<Utc> {
    let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
    Utc::now().checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use object_store::PutPayload;
    use pretty_assertions::assert_eq;

    use super::*;

    fn s3_config() -> StorageConfig {
        StorageConfig {
            bucket: "vitrine-media".into(),
            region: "us-east-1".into(),
            endpoint: "http://localhost:9000".into(),
            access_key_id: "test-access".into(),
            secret_access_key: "test-secret".into(),
            allow_http: true,
            path_style: true,
            ..StorageConfig::default()
        }
    }

    #[test]
    fn from_config_requires_credentials() {
        let err = MediaStore::from_config(&StorageConfig::default()).unwrap_err();
        assert!(matches!(err, StorageError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn presigned_put_carries_key_and_expiry() {
        let store = MediaStore::from_config(&s3_config()).unwrap();
        assert!(store.can_presign());

        let req = store
            .presign_put(
                "media/app-1/med-1/icon.png",
                "image/png",
                Duration::from_secs(300),
            )
            .await
            .unwrap();
        assert_eq!(req.method, "PUT");
        assert!(req.url.starts_with("http://localhost:9000/vitrine-media/media/app-1/med-1/icon.png?"));
        assert!(req.url.contains("X-Amz-Expires=300"), "{}", req.url);
        assert!(req.url.contains("X-Amz-Signature="));
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "image/png".to_string())]
        );
        assert!(req.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn in_memory_store_cannot_presign() {
        let store = MediaStore::in_memory(&StorageConfig::default());
        let err = store
            .presign_put("media/a/b/c.png", "image/png", Duration::from_secs(60))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotConfigured(_)));
        assert_eq!(store.download_url("media/a/b/c.png").await.unwrap(), None);
    }

    #[tokio::test]
    async fn public_base_url_wins_over_presigning() {
        let config = StorageConfig {
            public_base_url: "https://cdn.example.com/".into(),
            ..s3_config()
        };
        let store = MediaStore::from_config(&config).unwrap();
        assert_eq!(
            store.download_url("media/a/b/c.png").await.unwrap(),
            Some("https://cdn.example.com/media/a/b/c.png".into())
        );
    }

    #[tokio::test]
    async fn download_url_presigns_without_public_base() {
        let store = MediaStore::from_config(&s3_config()).unwrap();
        let url = store.download_url("media/a/b/c.png").await.unwrap().unwrap();
        assert!(url.contains("X-Amz-Expires=900"), "{url}");
    }

    #[tokio::test]
    async fn head_and_delete_round_trip() {
        let store = MediaStore::in_memory(&StorageConfig::default());
        let key = "media/app-1/med-1/shot.png";
        assert_eq!(store.head(key).await.unwrap(), None);

        store
            .object_store()
            .put(&Path::from(key), PutPayload::from(vec![7_u8; 42]))
            .await
            .unwrap();
        assert_eq!(store.head(key).await.unwrap(), Some(42));

        store.delete(key).await.unwrap();
        assert_eq!(store.head(key).await.unwrap(), None);
        // Deleting again is fine.
        store.delete(key).await.unwrap();
    }

    #[tokio::test]
    async fn invalid_keys_are_rejected() {
        let store = MediaStore::in_memory(&StorageConfig::default());
        let err = store.head("media/../secret").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey { .. }));
    }
}
