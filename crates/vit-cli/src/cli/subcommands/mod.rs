mod app;
mod media;
mod org;
mod timeline;
mod user;
mod version;

pub use app::{AppCommands, AppCreateArgs, AppListArgs, AppUpdateArgs};
pub use media::MediaCommands;
pub use org::OrgCommands;
pub use timeline::TimelineCommands;
pub use user::UserCommands;
pub use version::VersionCommands;
