//! Status enums, entity types, and audit actions for Vitrine.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Status enums with state machines provide `allowed_next_states()` to enforce
//! valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// AppStatus
// ---------------------------------------------------------------------------

/// Publication status of an app.
///
/// ```text
/// draft → in_review → published → archived
///       → published   → draft (unpublish)
///       → archived    archived → draft
/// in_review → draft
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
#[serde(rename_all = "snake_case")]
pub enum AppStatus {
    Draft,
    InReview,
    Published,
    Archived,
}

impl AppStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::InReview, Self::Published, Self::Archived],
            Self::InReview => &[Self::Draft, Self::Published],
            Self::Published => &[Self::Draft, Self::Archived],
            Self::Archived => &[Self::Draft],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InReview => "in_review",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for AppStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// Platform an app runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Web,
    Ios,
    Android,
    Desktop,
    Cli,
}

impl Platform {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Desktop => "desktop",
            Self::Cli => "cli",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MediaKind
// ---------------------------------------------------------------------------

/// Role a media asset plays on an app's page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Icon,
    Screenshot,
    Banner,
    Video,
}

impl MediaKind {
    /// MIME types accepted for uploads of this kind.
    #[must_use]
    pub const fn allowed_content_types(self) -> &'static [&'static str] {
        match self {
            Self::Icon => &[
                "image/png",
                "image/jpeg",
                "image/webp",
                "image/gif",
                "image/svg+xml",
                "image/x-icon",
            ],
            Self::Screenshot | Self::Banner => &[
                "image/png",
                "image/jpeg",
                "image/webp",
                "image/gif",
                "image/svg+xml",
            ],
            Self::Video => &["video/mp4", "video/webm"],
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Icon => "icon",
            Self::Screenshot => "screenshot",
            Self::Banner => "banner",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MediaStatus
// ---------------------------------------------------------------------------

/// Upload status of a media asset.
///
/// ```text
/// pending → ready
///         → failed → pending (re-upload)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
#[serde(rename_all = "snake_case")]
pub enum MediaStatus {
    Pending,
    Ready,
    Failed,
}

impl MediaStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Ready, Self::Failed],
            Self::Failed => &[Self::Pending],
            Self::Ready => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TimelineKind
// ---------------------------------------------------------------------------

/// Kind of entry on an app's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
#[serde(rename_all = "snake_case")]
pub enum TimelineKind {
    Launch,
    Release,
    Milestone,
    Announcement,
}

impl TimelineKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Launch => "launch",
            Self::Release => "release",
            Self::Milestone => "milestone",
            Self::Announcement => "announcement",
        }
    }
}

impl fmt::Display for TimelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// Dashboard role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Editor,
    Viewer,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Entity types recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    App,
    AppVersion,
    Media,
    TimelineEvent,
    User,
    Organization,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::AppVersion => "app_version",
            Self::Media => "media",
            Self::TimelineEvent => "timeline_event",
            Self::User => "user",
            Self::Organization => "organization",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Mutation recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
    StatusChanged,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::StatusChanged => "status_changed",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected:expr) => {
            #[test]
            fn $name() {
                let json = serde_json::to_string(&$variant).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected));
                let back: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(back, $variant);
            }
        };
    }

    test_serde_roundtrip!(
        app_status_in_review,
        AppStatus,
        AppStatus::InReview,
        "in_review"
    );
    test_serde_roundtrip!(platform_ios, Platform, Platform::Ios, "ios");
    test_serde_roundtrip!(
        media_kind_screenshot,
        MediaKind,
        MediaKind::Screenshot,
        "screenshot"
    );
    test_serde_roundtrip!(
        timeline_kind_announcement,
        TimelineKind,
        TimelineKind::Announcement,
        "announcement"
    );
    test_serde_roundtrip!(
        entity_type_timeline_event,
        EntityType,
        EntityType::TimelineEvent,
        "timeline_event"
    );
    test_serde_roundtrip!(
        audit_action_status_changed,
        AuditAction,
        AuditAction::StatusChanged,
        "status_changed"
    );

    // --- Transition tests ---

    #[test]
    fn app_valid_transitions() {
        assert!(AppStatus::Draft.can_transition_to(AppStatus::InReview));
        assert!(AppStatus::Draft.can_transition_to(AppStatus::Published));
        assert!(AppStatus::InReview.can_transition_to(AppStatus::Published));
        assert!(AppStatus::InReview.can_transition_to(AppStatus::Draft));
        assert!(AppStatus::Published.can_transition_to(AppStatus::Archived));
        assert!(AppStatus::Published.can_transition_to(AppStatus::Draft));
        assert!(AppStatus::Archived.can_transition_to(AppStatus::Draft));
    }

    #[test]
    fn app_invalid_transitions() {
        assert!(!AppStatus::Archived.can_transition_to(AppStatus::Published));
        assert!(!AppStatus::InReview.can_transition_to(AppStatus::Archived));
        assert!(!AppStatus::Published.can_transition_to(AppStatus::InReview));
        assert!(!AppStatus::Draft.can_transition_to(AppStatus::Draft));
    }

    #[test]
    fn media_transitions() {
        assert!(MediaStatus::Pending.can_transition_to(MediaStatus::Ready));
        assert!(MediaStatus::Pending.can_transition_to(MediaStatus::Failed));
        assert!(MediaStatus::Failed.can_transition_to(MediaStatus::Pending));
        assert!(!MediaStatus::Failed.can_transition_to(MediaStatus::Ready));
        assert!(MediaStatus::Ready.allowed_next_states().is_empty());
    }

    #[test]
    fn video_accepts_only_video_types() {
        assert!(MediaKind::Video.allowed_content_types().contains(&"video/mp4"));
        assert!(!MediaKind::Video.allowed_content_types().contains(&"image/png"));
        assert!(MediaKind::Icon.allowed_content_types().contains(&"image/x-icon"));
        assert!(!MediaKind::Screenshot.allowed_content_types().contains(&"image/x-icon"));
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", AppStatus::InReview), "in_review");
        assert_eq!(format!("{}", Platform::Desktop), "desktop");
        assert_eq!(format!("{}", MediaKind::Banner), "banner");
        assert_eq!(format!("{}", MediaStatus::Failed), "failed");
        assert_eq!(format!("{}", TimelineKind::Milestone), "milestone");
        assert_eq!(format!("{}", UserRole::Editor), "editor");
        assert_eq!(format!("{}", EntityType::AppVersion), "app_version");
        assert_eq!(format!("{}", AuditAction::Deleted), "deleted");
    }
}
