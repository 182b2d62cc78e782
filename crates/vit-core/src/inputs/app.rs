use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AppStatus, Platform};
use crate::errors::CoreError;
use crate::validation::{
    NAME_MAX, TAGLINE_MAX, clean_optional, dedup_platforms, normalize_tags, validate_len,
    validate_optional_url, validate_slug,
};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct CreateAppInput {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "graphql", graphql(default))]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    #[cfg_attr(feature = "graphql", graphql(default))]
    pub tags: Vec<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub repository_url: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "graphql", graphql(default))]
    pub featured: bool,
}

impl CreateAppInput {
    /// Validate and normalize.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first invalid field.
    pub fn validated(self) -> Result<Self, CoreError> {
        let slug = self.slug.trim().to_string();
        validate_slug("slug", &slug)?;
        let name = self.name.trim().to_string();
        validate_len("name", &name, 1, NAME_MAX)?;
        let tagline = clean_optional(self.tagline);
        if let Some(t) = &tagline {
            validate_len("tagline", t, 1, TAGLINE_MAX)?;
        }
        let website_url = clean_optional(self.website_url);
        validate_optional_url("website_url", website_url.as_deref())?;
        let repository_url = clean_optional(self.repository_url);
        validate_optional_url("repository_url", repository_url.as_deref())?;
        Ok(Self {
            slug,
            name,
            tagline,
            description: clean_optional(self.description),
            platforms: dedup_platforms(self.platforms),
            tags: normalize_tags("tags", self.tags)?,
            website_url,
            repository_url,
            organization_id: clean_optional(self.organization_id),
            owner_id: clean_optional(self.owner_id),
            featured: self.featured,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct UpdateAppInput {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Replaces the whole platform list.
    #[serde(default)]
    pub platforms: Option<Vec<Platform>>,
    /// Replaces the whole tag list.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub repository_url: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
}

impl UpdateAppInput {
    /// Validate the fields that are present.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first invalid field.
    pub fn validated(self) -> Result<Self, CoreError> {
        if let Some(slug) = &self.slug {
            validate_slug("slug", slug.trim())?;
        }
        if let Some(name) = &self.name {
            validate_len("name", name, 1, NAME_MAX)?;
        }
        if let Some(t) = self.tagline.as_deref().filter(|t| !t.trim().is_empty()) {
            validate_len("tagline", t, 1, TAGLINE_MAX)?;
        }
        validate_optional_url("website_url", self.website_url.as_deref())?;
        validate_optional_url("repository_url", self.repository_url.as_deref())?;
        let tags = self
            .tags
            .map(|t| normalize_tags("tags", t))
            .transpose()?;
        Ok(Self {
            slug: self.slug.map(|s| s.trim().to_string()),
            name: self.name.map(|n| n.trim().to_string()),
            platforms: self.platforms.map(dedup_platforms),
            tags,
            ..self
        })
    }
}

/// Requested status change for an app.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct TransitionAppInput {
    pub status: AppStatus,
}

/// Filter for app listings. All fields are optional and combine with AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct AppFilter {
    #[serde(default)]
    pub status: Option<AppStatus>,
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    /// Full-text query over name, tagline, description, and tags.
    #[serde(default)]
    pub query: Option<String>,
}
