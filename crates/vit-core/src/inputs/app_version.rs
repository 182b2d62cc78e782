use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::validation::{clean_optional, parse_semver};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct CreateAppVersionInput {
    pub app_id: String,
    /// Semantic version, e.g. `1.4.0` or `2.0.0-rc.1`.
    pub version: String,
    #[serde(default)]
    pub release_notes: Option<String>,
    /// Defaults to the time of creation.
    #[serde(default)]
    pub released_at: Option<DateTime<Utc>>,
}

impl CreateAppVersionInput {
    /// Validate and normalize. The version is re-rendered in canonical form.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the app id is empty or the version
    /// is not valid semver.
    pub fn validated(self) -> Result<Self, CoreError> {
        let app_id = self.app_id.trim().to_string();
        if app_id.is_empty() {
            return Err(CoreError::invalid("app_id", "must not be empty"));
        }
        let version = parse_semver("version", &self.version)?.to_string();
        Ok(Self {
            app_id,
            version,
            release_notes: clean_optional(self.release_notes),
            released_at: self.released_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_trimmed() {
        let input = CreateAppVersionInput {
            app_id: "app-12345678".into(),
            version: " 1.0.0 ".into(),
            release_notes: None,
            released_at: None,
        }
        .validated()
        .unwrap();
        assert_eq!(input.version, "1.0.0");
    }

    #[test]
    fn rejects_partial_version() {
        let input = CreateAppVersionInput {
            app_id: "app-12345678".into(),
            version: "v1".into(),
            release_notes: None,
            released_at: None,
        };
        assert!(input.validated().is_err());
    }
}
