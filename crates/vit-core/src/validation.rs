//! Field validation and normalization rules shared by every input form.
//!
//! Each function takes the field name so errors can be attached to the
//! offending form field.

use url::Url;

use crate::enums::{MediaKind, Platform};
use crate::errors::CoreError;

pub const NAME_MAX: usize = 120;
pub const TAGLINE_MAX: usize = 160;
pub const TITLE_MAX: usize = 160;
pub const SLUG_MIN: usize = 2;
pub const SLUG_MAX: usize = 64;
pub const TAG_MAX: usize = 32;
pub const MAX_TAGS: usize = 20;
pub const FILE_NAME_MAX: usize = 255;

/// Check a trimmed string's length in characters.
///
/// # Errors
///
/// Returns `CoreError::Validation` when the length is outside `min..=max`.
pub fn validate_len(field: &str, value: &str, min: usize, max: usize) -> Result<(), CoreError> {
    let len = value.trim().chars().count();
    if len < min {
        if min == 1 {
            return Err(CoreError::invalid(field, "must not be empty"));
        }
        return Err(CoreError::invalid(
            field,
            format!("must be at least {min} characters"),
        ));
    }
    if len > max {
        return Err(CoreError::invalid(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(())
}

/// Validate a URL slug: lowercase ASCII letters, digits, and single dashes,
/// not starting or ending with a dash.
///
/// # Errors
///
/// Returns `CoreError::Validation` describing the first rule broken.
pub fn validate_slug(field: &str, slug: &str) -> Result<(), CoreError> {
    validate_len(field, slug, SLUG_MIN, SLUG_MAX)?;
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::invalid(
            field,
            "may only contain lowercase letters, digits, and dashes",
        ));
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(CoreError::invalid(field, "must not start or end with a dash"));
    }
    if slug.contains("--") {
        return Err(CoreError::invalid(field, "must not contain consecutive dashes"));
    }
    Ok(())
}

/// Trim and lowercase an email address after checking its shape.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the address has no local part, no
/// dotted domain, more than one `@`, or whitespace.
pub fn normalize_email(field: &str, email: &str) -> Result<String, CoreError> {
    let email = email.trim().to_ascii_lowercase();
    if email.chars().any(char::is_whitespace) {
        return Err(CoreError::invalid(field, "must not contain whitespace"));
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(CoreError::invalid(field, "must contain '@'"));
    };
    if local.is_empty() || domain.contains('@') {
        return Err(CoreError::invalid(field, "is not a valid email address"));
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(CoreError::invalid(field, "must have a dotted domain"));
    }
    validate_len(field, &email, 3, 254)?;
    Ok(email)
}

/// Validate an absolute `http`/`https` URL with a host.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the URL does not parse, uses another
/// scheme, or has no host.
pub fn validate_url(field: &str, url: &str) -> Result<(), CoreError> {
    let parsed =
        Url::parse(url).map_err(|e| CoreError::invalid(field, format!("is not a valid URL: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CoreError::invalid(field, "must start with http:// or https://"));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(CoreError::invalid(field, "must include a host"));
    }
    validate_len(field, url, 1, 2048)
}

/// Validate an optional URL. `None` and `Some("")` pass (empty clears on update).
///
/// # Errors
///
/// Returns `CoreError::Validation` if a non-empty value is not a valid URL.
pub fn validate_optional_url(field: &str, url: Option<&str>) -> Result<(), CoreError> {
    match url {
        Some(u) if !u.trim().is_empty() => validate_url(field, u.trim()),
        _ => Ok(()),
    }
}

/// Parse a semantic version string.
///
/// # Errors
///
/// Returns `CoreError::Validation` if `version` is not valid semver.
pub fn parse_semver(field: &str, version: &str) -> Result<semver::Version, CoreError> {
    semver::Version::parse(version.trim())
        .map_err(|e| CoreError::invalid(field, format!("is not a valid semantic version: {e}")))
}

/// Lowercase, trim, and deduplicate tags, preserving first-seen order.
///
/// # Errors
///
/// Returns `CoreError::Validation` for empty or overlong tags, tags with
/// whitespace, or more than [`MAX_TAGS`] distinct tags.
pub fn normalize_tags(field: &str, tags: Vec<String>) -> Result<Vec<String>, CoreError> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        validate_len(field, &tag, 1, TAG_MAX)?;
        if tag.chars().any(char::is_whitespace) {
            return Err(CoreError::invalid(field, "tags must not contain whitespace"));
        }
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    if out.len() > MAX_TAGS {
        return Err(CoreError::invalid(
            field,
            format!("at most {MAX_TAGS} tags are allowed"),
        ));
    }
    Ok(out)
}

/// Deduplicate platforms, preserving first-seen order.
#[must_use]
pub fn dedup_platforms(platforms: Vec<Platform>) -> Vec<Platform> {
    let mut out = Vec::with_capacity(platforms.len());
    for p in platforms {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}

/// Check a declared content type against the kind's allow-list.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the type is not accepted for `kind`.
pub fn validate_content_type(
    field: &str,
    kind: MediaKind,
    content_type: &str,
) -> Result<(), CoreError> {
    let ct = content_type.trim().to_ascii_lowercase();
    if kind.allowed_content_types().contains(&ct.as_str()) {
        Ok(())
    } else {
        Err(CoreError::invalid(
            field,
            format!("'{content_type}' is not allowed for {kind} media"),
        ))
    }
}

/// Trim an optional string, mapping blank values to `None`.
#[must_use]
pub fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
