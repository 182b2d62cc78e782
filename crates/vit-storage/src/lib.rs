//! # vit-storage
//!
//! Media object storage for Vitrine.
//!
//! Clients upload screenshots, icons and videos straight to an S3-compatible
//! bucket through presigned `PUT` URLs; the server only records the media row
//! and later confirms the object exists with a `HEAD`.

pub mod error;
pub mod keys;
pub mod store;

pub use error::StorageError;
pub use keys::{media_key, sanitize_segment};
pub use store::{MediaStore, PresignedRequest};
