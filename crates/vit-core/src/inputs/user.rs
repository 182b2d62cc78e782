use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::UserRole;
use crate::errors::CoreError;
use crate::validation::{
    NAME_MAX, clean_optional, normalize_email, validate_len, validate_optional_url,
};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct CreateUserInput {
    pub email: String,
    pub name: String,
    /// Defaults to `editor`.
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl CreateUserInput {
    /// Validate and normalize. The email is lowercased.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first invalid field.
    pub fn validated(self) -> Result<Self, CoreError> {
        let email = normalize_email("email", &self.email)?;
        let name = self.name.trim().to_string();
        validate_len("name", &name, 1, NAME_MAX)?;
        let avatar_url = clean_optional(self.avatar_url);
        validate_optional_url("avatar_url", avatar_url.as_deref())?;
        Ok(Self {
            email,
            name,
            role: Some(self.role.unwrap_or(UserRole::Editor)),
            organization_id: clean_optional(self.organization_id),
            avatar_url,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct UpdateUserInput {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
    /// Empty string detaches the user from its organization.
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl UpdateUserInput {
    /// Validate the fields that are present.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first invalid field.
    pub fn validated(self) -> Result<Self, CoreError> {
        let email = self
            .email
            .as_deref()
            .map(|e| normalize_email("email", e))
            .transpose()?;
        if let Some(name) = &self.name {
            validate_len("name", name, 1, NAME_MAX)?;
        }
        validate_optional_url("avatar_url", self.avatar_url.as_deref())?;
        Ok(Self {
            email,
            name: self.name.map(|n| n.trim().to_string()),
            ..self
        })
    }
}
