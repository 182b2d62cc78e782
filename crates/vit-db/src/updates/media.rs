//! Media update builder.

use serde::Serialize;
use vit_core::inputs::{UpdateMediaInput, patch_nullable};

#[derive(Debug, Clone, Default, Serialize)]
pub struct MediaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

pub struct MediaUpdateBuilder(MediaUpdate);

impl MediaUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(MediaUpdate::default())
    }

    #[must_use]
    pub fn alt_text(mut self, val: Option<String>) -> Self {
        self.0.alt_text = Some(val);
        self
    }

    #[must_use]
    pub const fn position(mut self, val: i64) -> Self {
        self.0.position = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> MediaUpdate {
        self.0
    }
}

impl Default for MediaUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<UpdateMediaInput> for MediaUpdate {
    fn from(input: UpdateMediaInput) -> Self {
        let mut b = MediaUpdateBuilder::new();
        if let Some(alt) = patch_nullable(input.alt_text.as_deref()) {
            b = b.alt_text(alt);
        }
        if let Some(position) = input.position {
            b = b.position(position);
        }
        b.build()
    }
}
