use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::validation::{
    NAME_MAX, clean_optional, validate_len, validate_optional_url, validate_slug,
};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct CreateOrganizationInput {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateOrganizationInput {
    /// Validate and normalize.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first invalid field.
    pub fn validated(self) -> Result<Self, CoreError> {
        let name = self.name.trim().to_string();
        validate_len("name", &name, 1, NAME_MAX)?;
        let slug = self.slug.trim().to_string();
        validate_slug("slug", &slug)?;
        let website_url = clean_optional(self.website_url);
        validate_optional_url("website_url", website_url.as_deref())?;
        Ok(Self {
            name,
            slug,
            website_url,
            description: clean_optional(self.description),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct UpdateOrganizationInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateOrganizationInput {
    /// Validate the fields that are present.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first invalid field.
    pub fn validated(self) -> Result<Self, CoreError> {
        if let Some(name) = &self.name {
            validate_len("name", name, 1, NAME_MAX)?;
        }
        if let Some(slug) = &self.slug {
            validate_slug("slug", slug.trim())?;
        }
        validate_optional_url("website_url", self.website_url.as_deref())?;
        Ok(Self {
            name: self.name.map(|n| n.trim().to_string()),
            slug: self.slug.map(|s| s.trim().to_string()),
            ..self
        })
    }
}
