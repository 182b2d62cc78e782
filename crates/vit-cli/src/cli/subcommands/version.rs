use clap::Subcommand;

/// App version commands.
#[derive(Clone, Debug, Subcommand)]
pub enum VersionCommands {
    /// Record a release. Also adds a release event to the timeline.
    Create {
        app_id: String,
        version: String,
        #[arg(long)]
        notes: Option<String>,
        /// RFC 3339 timestamp, defaults to now
        #[arg(long)]
        released_at: Option<String>,
    },
    /// Get a version by ID.
    Get { id: String },
    /// Delete a version.
    Delete { id: String },
    /// List an app's versions, newest first.
    List { app_id: String },
    /// Show an app's latest version.
    Latest { app_id: String },
}
