use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TimelineKind;
use crate::errors::CoreError;
use crate::validation::{TITLE_MAX, clean_optional, validate_len, validate_optional_url};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct CreateTimelineEventInput {
    pub app_id: String,
    pub kind: TimelineKind,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    /// Defaults to the time of creation.
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
}

impl CreateTimelineEventInput {
    /// Validate and normalize.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first invalid field.
    pub fn validated(self) -> Result<Self, CoreError> {
        let app_id = self.app_id.trim().to_string();
        if app_id.is_empty() {
            return Err(CoreError::invalid("app_id", "must not be empty"));
        }
        let title = self.title.trim().to_string();
        validate_len("title", &title, 1, TITLE_MAX)?;
        let link_url = clean_optional(self.link_url);
        validate_optional_url("link_url", link_url.as_deref())?;
        Ok(Self {
            app_id,
            kind: self.kind,
            title,
            body: clean_optional(self.body),
            link_url,
            occurred_at: self.occurred_at,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct UpdateTimelineEventInput {
    #[serde(default)]
    pub kind: Option<TimelineKind>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
}

impl UpdateTimelineEventInput {
    /// Validate the fields that are present.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first invalid field.
    pub fn validated(self) -> Result<Self, CoreError> {
        if let Some(title) = &self.title {
            validate_len("title", title, 1, TITLE_MAX)?;
        }
        validate_optional_url("link_url", self.link_url.as_deref())?;
        Ok(Self {
            title: self.title.map(|t| t.trim().to_string()),
            ..self
        })
    }
}
