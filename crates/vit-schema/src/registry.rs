//! Central schema registry for all Vitrine types.
//!
//! The `SchemaRegistry` builds JSON Schemas from vit-core types at construction
//! time using [`schemars::schema_for!`] and validates values via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Central store of every JSON Schema exposed by Vitrine.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`.
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        if let Ok(schema) = serde_json::to_value(schema_for!($ty)) {
            $map.insert($name, schema);
        }
    };
}

impl SchemaRegistry {
    /// Build a registry with every entity, input, and response schema.
    #[must_use]
    pub fn new() -> Self {
        use vit_core::{entities, inputs, responses};

        let mut schemas = HashMap::new();

        // --- Entities (7) ---
        register!(schemas, "organization", entities::Organization);
        register!(schemas, "user", entities::User);
        register!(schemas, "app", entities::App);
        register!(schemas, "app_version", entities::AppVersion);
        register!(schemas, "media", entities::Media);
        register!(schemas, "timeline_event", entities::TimelineEvent);
        register!(schemas, "audit_entry", entities::AuditEntry);

        // --- Inputs (13) ---
        register!(
            schemas,
            "create_organization_input",
            inputs::CreateOrganizationInput
        );
        register!(
            schemas,
            "update_organization_input",
            inputs::UpdateOrganizationInput
        );
        register!(schemas, "create_user_input", inputs::CreateUserInput);
        register!(schemas, "update_user_input", inputs::UpdateUserInput);
        register!(schemas, "create_app_input", inputs::CreateAppInput);
        register!(schemas, "update_app_input", inputs::UpdateAppInput);
        register!(schemas, "transition_app_input", inputs::TransitionAppInput);
        register!(schemas, "app_filter", inputs::AppFilter);
        register!(
            schemas,
            "create_app_version_input",
            inputs::CreateAppVersionInput
        );
        register!(
            schemas,
            "create_timeline_event_input",
            inputs::CreateTimelineEventInput
        );
        register!(
            schemas,
            "update_timeline_event_input",
            inputs::UpdateTimelineEventInput
        );
        register!(schemas, "request_upload_input", inputs::RequestUploadInput);
        register!(schemas, "update_media_input", inputs::UpdateMediaInput);

        // --- Responses (3) ---
        register!(schemas, "presigned_upload", responses::PresignedUpload);
        register!(schemas, "media_with_url", responses::MediaWithUrl);
        register!(schemas, "app_page", responses::Page<entities::App>);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
