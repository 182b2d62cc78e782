use clap::Subcommand;

/// Timeline event commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TimelineCommands {
    /// Add an event to an app's timeline.
    Create {
        app_id: String,
        /// launch, release, milestone, announcement
        #[arg(long)]
        kind: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        link_url: Option<String>,
        /// RFC 3339 timestamp, defaults to now
        #[arg(long)]
        occurred_at: Option<String>,
    },
    /// Get an event by ID.
    Get { id: String },
    /// Update an event. Pass an empty string to clear a field.
    Update {
        id: String,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        link_url: Option<String>,
        #[arg(long)]
        occurred_at: Option<String>,
    },
    /// Delete an event.
    Delete { id: String },
    /// List an app's timeline, newest first.
    List { app_id: String },
}
