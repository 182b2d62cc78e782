//! Response envelopes shared by the REST and GraphQL surfaces.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{App, Media, Organization, User};

/// Element type a [`Page`] may carry. With the `graphql` feature this is
/// any GraphQL output type; otherwise every type qualifies.
#[cfg(feature = "graphql")]
pub trait PageItem: async_graphql::OutputType {}

#[cfg(feature = "graphql")]
impl<T: async_graphql::OutputType> PageItem for T {}

#[cfg(not(feature = "graphql"))]
pub trait PageItem {}

#[cfg(not(feature = "graphql"))]
impl<T> PageItem for T {}

/// One page of a listing, with the total count of matching rows.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
#[cfg_attr(
    feature = "graphql",
    graphql(
        concrete(name = "AppPage", params(App)),
        concrete(name = "UserPage", params(User)),
        concrete(name = "OrganizationPage", params(Organization))
    )
)]
pub struct Page<T: PageItem> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

impl<T: PageItem> Page<T> {
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64, limit: u32, offset: u32) -> Self {
        Self {
            items,
            total,
            limit,
            offset,
        }
    }

    /// Whether rows exist past this page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        u64::from(self.offset) + (self.items.len() as u64) < self.total
    }
}

/// A header the client must send with a presigned request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
pub struct HeaderPair {
    pub name: String,
    pub value: String,
}

/// Pending media row plus the presigned `PUT` the client uploads to.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
pub struct PresignedUpload {
    pub media: Media,
    pub upload_url: String,
    pub method: String,
    pub headers: Vec<HeaderPair>,
    pub expires_at: DateTime<Utc>,
}

/// Media row with a URL the client can fetch it from.
///
/// `download_url` is `None` while the upload is not ready, or when storage
/// cannot produce URLs.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
pub struct MediaWithUrl {
    pub media: Media,
    pub download_url: Option<String>,
}
