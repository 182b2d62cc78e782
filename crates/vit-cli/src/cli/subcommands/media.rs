use clap::Subcommand;

/// Media commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MediaCommands {
    /// Create a pending media row and print its presigned upload URL.
    Request {
        app_id: String,
        /// icon, screenshot, banner, video
        #[arg(long)]
        kind: String,
        #[arg(long)]
        file: String,
        #[arg(long)]
        content_type: String,
        /// Declared size in bytes
        #[arg(long)]
        size: i64,
        #[arg(long)]
        alt_text: Option<String>,
        #[arg(long)]
        position: Option<i64>,
    },
    /// Confirm an upload once the bytes are stored.
    Complete { id: String },
    /// Re-open a failed upload with a fresh URL.
    Retry { id: String },
    /// Get a media row with its download URL.
    Get { id: String },
    /// Update alt text or position.
    Update {
        id: String,
        #[arg(long)]
        alt_text: Option<String>,
        #[arg(long)]
        position: Option<i64>,
    },
    /// Delete a media row and its stored object.
    Delete { id: String },
    /// List an app's media.
    List {
        app_id: String,
        #[arg(long)]
        ready: bool,
    },
}
