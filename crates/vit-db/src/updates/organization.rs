//! Organization update builder.

use serde::Serialize;
use vit_core::inputs::{UpdateOrganizationInput, patch_nullable};

#[derive(Debug, Clone, Default, Serialize)]
pub struct OrganizationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

pub struct OrganizationUpdateBuilder(OrganizationUpdate);

impl OrganizationUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(OrganizationUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, val: impl Into<String>) -> Self {
        self.0.name = Some(val.into());
        self
    }

    #[must_use]
    pub fn slug(mut self, val: impl Into<String>) -> Self {
        self.0.slug = Some(val.into());
        self
    }

    #[must_use]
    pub fn website_url(mut self, val: Option<String>) -> Self {
        self.0.website_url = Some(val);
        self
    }

    #[must_use]
    pub fn description(mut self, val: Option<String>) -> Self {
        self.0.description = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> OrganizationUpdate {
        self.0
    }
}

impl Default for OrganizationUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<UpdateOrganizationInput> for OrganizationUpdate {
    fn from(input: UpdateOrganizationInput) -> Self {
        let mut b = OrganizationUpdateBuilder::new();
        if let Some(name) = input.name {
            b = b.name(name);
        }
        if let Some(slug) = input.slug {
            b = b.slug(slug);
        }
        if let Some(url) = patch_nullable(input.website_url.as_deref()) {
            b = b.website_url(url);
        }
        if let Some(desc) = patch_nullable(input.description.as_deref()) {
            b = b.description(desc);
        }
        b.build()
    }
}
