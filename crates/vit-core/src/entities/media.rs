use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{MediaKind, MediaStatus};

/// A media asset attached to an app. The bytes live in object storage under
/// `storage_key`; this row tracks upload state and display metadata.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
pub struct Media {
    pub id: String,
    pub app_id: String,
    pub kind: MediaKind,
    pub status: MediaStatus,
    pub storage_key: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: Option<i64>,
    pub alt_text: Option<String>,
    pub position: i64,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
