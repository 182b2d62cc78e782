//! Timeline event update builder.

use chrono::{DateTime, Utc};
use serde::Serialize;
use vit_core::enums::TimelineKind;
use vit_core::inputs::{UpdateTimelineEventInput, patch_nullable};

#[derive(Debug, Clone, Default, Serialize)]
pub struct TimelineEventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<TimelineKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<DateTime<Utc>>,
}

pub struct TimelineEventUpdateBuilder(TimelineEventUpdate);

impl TimelineEventUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TimelineEventUpdate::default())
    }

    #[must_use]
    pub const fn kind(mut self, val: TimelineKind) -> Self {
        self.0.kind = Some(val);
        self
    }

    #[must_use]
    pub fn title(mut self, val: impl Into<String>) -> Self {
        self.0.title = Some(val.into());
        self
    }

    #[must_use]
    pub fn body(mut self, val: Option<String>) -> Self {
        self.0.body = Some(val);
        self
    }

    #[must_use]
    pub fn link_url(mut self, val: Option<String>) -> Self {
        self.0.link_url = Some(val);
        self
    }

    #[must_use]
    pub const fn occurred_at(mut self, val: DateTime<Utc>) -> Self {
        self.0.occurred_at = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> TimelineEventUpdate {
        self.0
    }
}

impl Default for TimelineEventUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<UpdateTimelineEventInput> for TimelineEventUpdate {
    fn from(input: UpdateTimelineEventInput) -> Self {
        let mut b = TimelineEventUpdateBuilder::new();
        if let Some(kind) = input.kind {
            b = b.kind(kind);
        }
        if let Some(title) = input.title {
            b = b.title(title);
        }
        if let Some(body) = patch_nullable(input.body.as_deref()) {
            b = b.body(body);
        }
        if let Some(link) = patch_nullable(input.link_url.as_deref()) {
            b = b.link_url(link);
        }
        if let Some(at) = input.occurred_at {
            b = b.occurred_at(at);
        }
        b.build()
    }
}
