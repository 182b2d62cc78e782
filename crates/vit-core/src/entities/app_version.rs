use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A released version of an app. `version` is a semver string, unique per app.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
pub struct AppVersion {
    pub id: String,
    pub app_id: String,
    pub version: String,
    pub release_notes: Option<String>,
    pub released_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
