//! Entity structs for all Vitrine domain objects.
//!
//! Each entity maps to a table in the libSQL database (see `vit-db/migrations`).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip
//! and schema validation. With the `graphql` feature they are also GraphQL objects.

mod app;
mod app_version;
mod audit;
mod media;
mod organization;
mod timeline;
mod user;

pub use app::App;
pub use app_version::AppVersion;
pub use audit::AuditEntry;
pub use media::Media;
pub use organization::Organization;
pub use timeline::TimelineEvent;
pub use user::User;
