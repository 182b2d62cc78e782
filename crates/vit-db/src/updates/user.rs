//! User update builder.

use serde::Serialize;
use vit_core::enums::UserRole;
use vit_core::inputs::{UpdateUserInput, patch_nullable};

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<Option<String>>,
}

pub struct UserUpdateBuilder(UserUpdate);

impl UserUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(UserUpdate::default())
    }

    /// Expects an already normalized (lowercased) address.
    #[must_use]
    pub fn email(mut self, val: impl Into<String>) -> Self {
        self.0.email = Some(val.into());
        self
    }

    #[must_use]
    pub fn name(mut self, val: impl Into<String>) -> Self {
        self.0.name = Some(val.into());
        self
    }

    #[must_use]
    pub const fn role(mut self, val: UserRole) -> Self {
        self.0.role = Some(val);
        self
    }

    #[must_use]
    pub fn organization_id(mut self, val: Option<String>) -> Self {
        self.0.organization_id = Some(val);
        self
    }

    #[must_use]
    pub fn avatar_url(mut self, val: Option<String>) -> Self {
        self.0.avatar_url = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> UserUpdate {
        self.0
    }
}

impl Default for UserUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<UpdateUserInput> for UserUpdate {
    fn from(input: UpdateUserInput) -> Self {
        let mut b = UserUpdateBuilder::new();
        if let Some(email) = input.email {
            b = b.email(email);
        }
        if let Some(name) = input.name {
            b = b.name(name);
        }
        if let Some(role) = input.role {
            b = b.role(role);
        }
        if let Some(org) = patch_nullable(input.organization_id.as_deref()) {
            b = b.organization_id(org);
        }
        if let Some(url) = patch_nullable(input.avatar_url.as_deref()) {
            b = b.avatar_url(url);
        }
        b.build()
    }
}
