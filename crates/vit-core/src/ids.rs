//! ID prefix constants.
//!
//! IDs are `{prefix}-{8 hex chars}`, generated by the database layer.

pub const PREFIX_APP: &str = "app";
pub const PREFIX_APP_VERSION: &str = "ver";
pub const PREFIX_MEDIA: &str = "med";
pub const PREFIX_TIMELINE_EVENT: &str = "evt";
pub const PREFIX_USER: &str = "usr";
pub const PREFIX_ORGANIZATION: &str = "org";
pub const PREFIX_AUDIT: &str = "aud";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_APP,
    PREFIX_APP_VERSION,
    PREFIX_MEDIA,
    PREFIX_TIMELINE_EVENT,
    PREFIX_USER,
    PREFIX_ORGANIZATION,
    PREFIX_AUDIT,
];
