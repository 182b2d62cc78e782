use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AppStatus, Platform};

/// A showcased application. Publicly visible in the catalog once `published`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
pub struct App {
    pub id: String,
    /// URL-safe unique handle, e.g. `pixel-garden`.
    pub slug: String,
    pub name: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub status: AppStatus,
    pub platforms: Vec<Platform>,
    pub tags: Vec<String>,
    pub website_url: Option<String>,
    pub repository_url: Option<String>,
    pub organization_id: Option<String>,
    pub owner_id: Option<String>,
    pub featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
