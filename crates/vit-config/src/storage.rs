//! S3-compatible media storage configuration.

use serde::{Deserialize, Serialize};

fn default_region() -> String {
    String::from("us-east-1")
}

const fn default_presign_ttl_secs() -> u64 {
    900
}

/// 25 MiB.
const fn default_max_upload_bytes() -> u64 {
    25 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Bucket holding media objects.
    #[serde(default)]
    pub bucket: String,

    #[serde(default = "default_region")]
    pub region: String,

    /// Custom endpoint for S3-compatible stores (R2, MinIO). Empty uses AWS.
    #[serde(default)]
    pub endpoint: String,

    #[serde(default)]
    pub access_key_id: String,

    #[serde(default)]
    pub secret_access_key: String,

    /// Public CDN/base URL. When set, download URLs are `{public_base_url}/{key}`
    /// instead of presigned GETs.
    #[serde(default)]
    pub public_base_url: String,

    /// Lifetime of presigned URLs in seconds.
    #[serde(default = "default_presign_ttl_secs")]
    pub presign_ttl_secs: u64,

    /// Largest accepted upload.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,

    /// Allow plain-HTTP endpoints (local MinIO).
    #[serde(default)]
    pub allow_http: bool,

    /// Use path-style instead of virtual-hosted-style requests.
    #[serde(default)]
    pub path_style: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: default_region(),
            endpoint: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            public_base_url: String::new(),
            presign_ttl_secs: default_presign_ttl_secs(),
            max_upload_bytes: default_max_upload_bytes(),
            allow_http: false,
            path_style: false,
        }
    }
}

impl StorageConfig {
    /// Check if the storage config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.bucket.is_empty()
            && !self.access_key_id.is_empty()
            && !self.secret_access_key.is_empty()
    }
}
