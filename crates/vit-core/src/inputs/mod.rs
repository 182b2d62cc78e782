//! Create/update input types accepted by the REST and GraphQL surfaces.
//!
//! Every input exposes `validated(self)`, which checks field rules and returns
//! a normalized copy (trimmed strings, lowercased emails and tags, deduplicated
//! platforms). Update inputs treat every field as optional; on nullable fields
//! an empty string means "clear this value".

mod app;
mod app_version;
mod media;
mod organization;
mod timeline;
mod user;

pub use app::{AppFilter, CreateAppInput, TransitionAppInput, UpdateAppInput};
pub use app_version::CreateAppVersionInput;
pub use media::{RequestUploadInput, UpdateMediaInput};
pub use organization::{CreateOrganizationInput, UpdateOrganizationInput};
pub use timeline::{CreateTimelineEventInput, UpdateTimelineEventInput};
pub use user::{CreateUserInput, UpdateUserInput};

/// Interpret an optional update field for a nullable column.
///
/// `None` leaves the column untouched, `Some("")` clears it, and any other
/// value sets it (trimmed).
#[must_use]
pub fn patch_nullable(value: Option<&str>) -> Option<Option<String>> {
    value.map(|v| {
        let v = v.trim();
        if v.is_empty() { None } else { Some(v.to_string()) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_nullable_semantics() {
        assert_eq!(patch_nullable(None), None);
        assert_eq!(patch_nullable(Some("")), Some(None));
        assert_eq!(patch_nullable(Some("  ")), Some(None));
        assert_eq!(patch_nullable(Some(" x ")), Some(Some("x".to_string())));
    }
}
