//! App update builder.

use serde::Serialize;
use vit_core::enums::Platform;
use vit_core::inputs::{UpdateAppInput, patch_nullable};

#[derive(Debug, Clone, Default, Serialize)]
pub struct AppUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<Platform>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

pub struct AppUpdateBuilder(AppUpdate);

impl AppUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(AppUpdate::default())
    }

    #[must_use]
    pub fn slug(mut self, val: impl Into<String>) -> Self {
        self.0.slug = Some(val.into());
        self
    }

    #[must_use]
    pub fn name(mut self, val: impl Into<String>) -> Self {
        self.0.name = Some(val.into());
        self
    }

    #[must_use]
    pub fn tagline(mut self, val: Option<String>) -> Self {
        self.0.tagline = Some(val);
        self
    }

    #[must_use]
    pub fn description(mut self, val: Option<String>) -> Self {
        self.0.description = Some(val);
        self
    }

    #[must_use]
    pub fn platforms(mut self, val: Vec<Platform>) -> Self {
        self.0.platforms = Some(val);
        self
    }

    #[must_use]
    pub fn tags(mut self, val: Vec<String>) -> Self {
        self.0.tags = Some(val);
        self
    }

    #[must_use]
    pub fn website_url(mut self, val: Option<String>) -> Self {
        self.0.website_url = Some(val);
        self
    }

    #[must_use]
    pub fn repository_url(mut self, val: Option<String>) -> Self {
        self.0.repository_url = Some(val);
        self
    }

    #[must_use]
    pub fn organization_id(mut self, val: Option<String>) -> Self {
        self.0.organization_id = Some(val);
        self
    }

    #[must_use]
    pub fn owner_id(mut self, val: Option<String>) -> Self {
        self.0.owner_id = Some(val);
        self
    }

    #[must_use]
    pub const fn featured(mut self, val: bool) -> Self {
        self.0.featured = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> AppUpdate {
        self.0
    }
}

impl Default for AppUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<UpdateAppInput> for AppUpdate {
    fn from(input: UpdateAppInput) -> Self {
        let mut b = AppUpdateBuilder::new();
        if let Some(slug) = input.slug {
            b = b.slug(slug);
        }
        if let Some(name) = input.name {
            b = b.name(name);
        }
        if let Some(v) = patch_nullable(input.tagline.as_deref()) {
            b = b.tagline(v);
        }
        if let Some(v) = patch_nullable(input.description.as_deref()) {
            b = b.description(v);
        }
        if let Some(platforms) = input.platforms {
            b = b.platforms(platforms);
        }
        if let Some(tags) = input.tags {
            b = b.tags(tags);
        }
        if let Some(v) = patch_nullable(input.website_url.as_deref()) {
            b = b.website_url(v);
        }
        if let Some(v) = patch_nullable(input.repository_url.as_deref()) {
            b = b.repository_url(v);
        }
        if let Some(v) = patch_nullable(input.organization_id.as_deref()) {
            b = b.organization_id(v);
        }
        if let Some(v) = patch_nullable(input.owner_id.as_deref()) {
            b = b.owner_id(v);
        }
        if let Some(featured) = input.featured {
            b = b.featured(featured);
        }
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_become_clears() {
        let update: AppUpdate = UpdateAppInput {
            tagline: Some(String::new()),
            owner_id: Some("usr-1".into()),
            ..Default::default()
        }
        .into();
        assert_eq!(update.tagline, Some(None));
        assert_eq!(update.owner_id, Some(Some("usr-1".into())));
        assert_eq!(update.name, None);
    }

    #[test]
    fn detail_serializes_only_changed_fields() {
        let update = AppUpdateBuilder::new().featured(true).tagline(None).build();
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"featured": true, "tagline": null}));
    }
}
