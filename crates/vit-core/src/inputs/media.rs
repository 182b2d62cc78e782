use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::MediaKind;
use crate::errors::CoreError;
use crate::validation::{FILE_NAME_MAX, clean_optional, validate_content_type, validate_len};

/// Request for a presigned upload slot.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct RequestUploadInput {
    pub app_id: String,
    pub kind: MediaKind,
    pub file_name: String,
    pub content_type: String,
    /// Declared size of the file the client is about to upload.
    pub size_bytes: i64,
    #[serde(default)]
    pub alt_text: Option<String>,
    /// Defaults to the end of the app's media list.
    #[serde(default)]
    pub position: Option<i64>,
}

impl RequestUploadInput {
    /// Validate against the kind's content-type allow-list and the configured
    /// upload size limit. The content type is lowercased.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first invalid field.
    pub fn validated(self, max_upload_bytes: u64) -> Result<Self, CoreError> {
        let app_id = self.app_id.trim().to_string();
        if app_id.is_empty() {
            return Err(CoreError::invalid("app_id", "must not be empty"));
        }
        let file_name = self.file_name.trim().to_string();
        validate_len("file_name", &file_name, 1, FILE_NAME_MAX)?;
        let content_type = self.content_type.trim().to_ascii_lowercase();
        validate_content_type("content_type", self.kind, &content_type)?;
        let size = u64::try_from(self.size_bytes)
            .ok()
            .filter(|s| *s > 0)
            .ok_or_else(|| CoreError::invalid("size_bytes", "must be greater than zero"))?;
        if size > max_upload_bytes {
            return Err(CoreError::invalid(
                "size_bytes",
                format!("must be at most {max_upload_bytes} bytes"),
            ));
        }
        if self.position.is_some_and(|p| p < 0) {
            return Err(CoreError::invalid("position", "must not be negative"));
        }
        Ok(Self {
            app_id,
            kind: self.kind,
            file_name,
            content_type,
            size_bytes: self.size_bytes,
            alt_text: clean_optional(self.alt_text),
            position: self.position,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::InputObject))]
pub struct UpdateMediaInput {
    /// Empty string clears the alt text.
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub position: Option<i64>,
}

impl UpdateMediaInput {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a negative position.
    pub fn validated(self) -> Result<Self, CoreError> {
        if self.position.is_some_and(|p| p < 0) {
            return Err(CoreError::invalid("position", "must not be negative"));
        }
        Ok(self)
    }
}
