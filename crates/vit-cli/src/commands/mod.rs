pub mod app;
pub mod audit;
pub mod dispatch;
pub mod media;
pub mod migrate;
pub mod org;
pub mod schema;
pub mod serve;
pub mod shared;
pub mod timeline;
pub mod user;
pub mod version;
